/// Resolves `\"` escape sequences in a string literal body.
///
/// Only quotes are escapable; every other backslash is kept verbatim.
///
/// # Examples
/// ```
/// use inferra::util::text::unescape_quotes;
///
/// assert_eq!(unescape_quotes(r#"say \"hi\""#), "say \"hi\"");
/// ```
#[must_use]
pub fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}

/// Escapes quotes in rendered string output.
///
/// The inverse of [`unescape_quotes`], applied when a string-shaped value is
/// rendered back to quoted text.
#[must_use]
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Maps a character code point to a character for rendering.
///
/// Counts are unbounded, so a code point outside the Unicode scalar range
/// renders as U+FFFD instead of failing.
#[must_use]
pub fn char_for_code(code: usize) -> char {
    u32::try_from(code).ok()
                       .and_then(char::from_u32)
                       .unwrap_or(char::REPLACEMENT_CHARACTER)
}
