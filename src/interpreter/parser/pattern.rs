use std::iter::Peekable;

use crate::{
    ast::PatternItem,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression, parse_primary},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a bracketed extends pattern.
///
/// Syntax:
/// ```text
///     [ <item>, <item>, ... ]
/// ```
/// where each item is one of:
/// - an expression, matched by equality,
/// - `...expr`, spreading a concrete expression into the pattern,
/// - `infer Name` / `infer`, a positional capture,
/// - `...infer Name` / `...infer`, a variadic capture,
/// - `skip expr`, consuming a computed number of positions.
///
/// At most one variadic capture is permitted; a second one is a reserved
/// construct and is rejected here rather than given ad-hoc semantics.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `[`.
///
/// # Returns
/// The list of parsed pattern items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - the closing `]` is missing,
/// - more than one spread capture appears.
pub(crate) fn parse_pattern<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<PatternItem>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::LBracket, _)) = tokens.next() else {
        unreachable!()
    };

    let items = parse_comma_separated(tokens, parse_pattern_item, &Token::RBracket)?;

    let mut spreads = items.iter().filter(|item| {
                                      matches!(item,
                                               PatternItem::Infer { spread: true, .. })
                                  });
    if let (Some(_), Some(PatternItem::Infer { line, .. })) = (spreads.next(), spreads.next()) {
        return Err(ParseError::MultipleSpreadCaptures { line: *line });
    }

    Ok(items)
}

/// Parses a single pattern item.
///
/// Dispatches on the leading token: `...` introduces either a variadic
/// capture (`...infer`) or a spread expression, `infer` a positional
/// capture, and `skip` a skip marker. Anything else is an ordinary
/// expression.
fn parse_pattern_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<PatternItem>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::DotDotDot, _)) => {
            tokens.next();
            if let Some((Token::Infer, line)) = tokens.peek() {
                let line = *line;
                tokens.next();
                Ok(PatternItem::Infer { name: parse_capture_name(tokens),
                                        spread: true,
                                        line })
            } else {
                Ok(PatternItem::Spread(parse_expression(tokens)?))
            }
        },
        Some((Token::Infer, line)) => {
            let line = *line;
            tokens.next();
            Ok(PatternItem::Infer { name: parse_capture_name(tokens),
                                    spread: false,
                                    line })
        },
        Some((Token::Skip, line)) => {
            let line = *line;
            tokens.next();
            Ok(PatternItem::Skip { count: parse_primary(tokens)?,
                                   line })
        },
        _ => Ok(PatternItem::Expression(parse_expression(tokens)?)),
    }
}

/// Parses the optional name of an infer capture.
///
/// Captures are anonymous when the next token is not an identifier; nothing
/// is consumed in that case.
fn parse_capture_name<'a, I>(tokens: &mut Peekable<I>) -> Option<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(name), _)) = tokens.peek() {
        let name = name.clone();
        tokens.next();
        Some(name)
    } else {
        None
    }
}
