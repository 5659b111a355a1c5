use logos::Logos;

use crate::util::text::unescape_quotes;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_number)]
    Number(usize),
    /// String literal tokens, such as `"hi"`. The stored text has its
    /// escaped quotes resolved.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    String(String),
    /// `type`
    #[token("type")]
    Type,
    /// `export`
    #[token("export")]
    Export,
    /// `import`
    #[token("import")]
    Import,
    /// `from`
    #[token("from")]
    From,
    /// `extends`
    #[token("extends")]
    Extends,
    /// `infer`
    #[token("infer")]
    Infer,
    /// `skip`
    #[token("skip")]
    Skip,
    /// `abort`
    #[token("abort")]
    Abort,
    /// The unit literal `_`.
    #[token("_", priority = 10)]
    Unit,
    /// Identifier tokens; template or parameter names such as `Add` or `N1`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// ```
    /// // Multi line comments.
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `...`
    #[token("...")]
    DotDotDot,
    /// `::`
    #[token("::")]
    ColonColon,
    /// `<`
    #[token("<")]
    LAngle,
    /// `>`
    #[token(">")]
    RAngle,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Equals,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,

    /// Newlines; counted for error reporting, otherwise insignificant.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Automatically resets or increments as newlines are processed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(usize)`: The parsed count if it fits the host integer type.
/// - `None`: If the literal is too large to represent.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<usize> {
    lex.slice().parse().ok()
}

/// Parses a string literal from the current token slice.
///
/// Strips the surrounding quotes and resolves `\"` escapes; other escape
/// sequences are preserved verbatim.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The literal text without delimiters.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape_quotes(&slice[1..slice.len() - 1])
}
