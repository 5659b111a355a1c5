use std::iter::Peekable;

use crate::{
    ast::{ArrayItem, Condition, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            pattern::parse_pattern,
            utils::{expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It parses a primary
/// expression and then checks for a trailing `extends`, which turns the
/// primary into the evaluatee of a conditional.
///
/// Grammar: `expression := primary ("extends" condition "?" expression ":" expression)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let evaluatee = parse_primary(tokens)?;
    parse_conditional(tokens, evaluatee)
}

/// Parses the tail of a conditional expression, if present.
///
/// Syntax:
/// ```text
///     <evaluatee> extends <condition> ? <then> : <else>
/// ```
/// A bracketed condition is parsed as a capture pattern; any other condition
/// is a plain expression compared for equality. Chained conditionals nest
/// through the else branch, so
/// `A extends B ? C : D extends E ? F : G` groups the second conditional
/// under the first `:`.
///
/// If the next token is not `extends`, the evaluatee is returned unchanged.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the evaluatee.
/// - `evaluatee`: The already-parsed expression being tested.
///
/// # Returns
/// An [`Expr::Conditional`] node, or `evaluatee` itself.
///
/// # Errors
/// Returns a `ParseError` if the condition, branches, or the `?`/`:`
/// separators are malformed.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, evaluatee: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Extends, line)) = tokens.peek() else {
        return Ok(evaluatee);
    };
    let line = *line;
    tokens.next();

    let condition = if let Some((Token::LBracket, _)) = tokens.peek() {
        Condition::Pattern(parse_pattern(tokens)?)
    } else {
        Condition::Value(Box::new(parse_primary(tokens)?))
    };

    expect_token(tokens, &Token::Question, line)?;
    let then_branch = parse_expression(tokens)?;
    expect_token(tokens, &Token::Colon, line)?;
    let else_branch = parse_expression(tokens)?;

    Ok(Expr::Conditional { evaluatee: Box::new(evaluatee),
                           condition,
                           then_branch: Box::new(then_branch),
                           else_branch: Box::new(else_branch),
                           line })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - the unit literal `_`
/// - string literals
/// - abort expressions
/// - array literals
/// - parenthesized expressions
/// - template calls and parameter references
///
/// This function does not handle the conditional tail; [`parse_expression`]
/// layers that on top.
///
/// Grammar (simplified):
/// ```text
///     primary := number
///              | "_"
///              | string
///              | "abort" ("(" string ")")?
///              | "[" elements "]"
///              | "(" expression ")"
///              | identifier ("::" identifier)? ("<" arguments ">")?
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Number(value), line) => {
            let expr = Expr::NumberLiteral { value: *value,
                                             line:  *line, };
            tokens.next();
            Ok(expr)
        },
        (Token::Unit, line) => {
            let expr = Expr::UnitLiteral { line: *line };
            tokens.next();
            Ok(expr)
        },
        (Token::String(text), line) => {
            let expr = Expr::StringLiteral { text: text.clone(),
                                             line: *line, };
            tokens.next();
            Ok(expr)
        },
        (Token::Abort, _) => parse_abort(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Identifier(_), _) => parse_call_or_reference(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses an abort expression with an optional message.
///
/// Syntax: `abort` or `abort("message")`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `abort` keyword.
///
/// # Returns
/// An [`Expr::Abort`] node.
///
/// # Errors
/// Returns a `ParseError` if the parenthesized form does not contain a
/// single string literal.
fn parse_abort<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Abort, line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    let Some((Token::LParen, _)) = tokens.peek() else {
        return Ok(Expr::Abort { message: None, line });
    };
    tokens.next();

    let message = match tokens.next() {
        Some((Token::String(text), _)) => text.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected abort message string, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };
    expect_token(tokens, &Token::RParen, line)?;

    Ok(Expr::Abort { message: Some(message),
                     line })
}

/// Parses an array literal of the form `[e1, ...e2, e3]`.
///
/// Elements are either plain expressions or spreads introduced by `...`.
/// An empty array `[]` is accepted.
///
/// Grammar: `array := "[" (element ("," element)*)? "]"`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `[`.
///
/// # Returns
/// An [`Expr::ArrayLiteral`] with its list of elements.
///
/// # Errors
/// Returns a `ParseError` if elements fail to parse or the closing `]` is
/// missing.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::LBracket, line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    let items = parse_comma_separated(tokens, parse_array_item, &Token::RBracket)?;

    Ok(Expr::ArrayLiteral { items, line })
}

/// Parses a single array element, plain or spread.
fn parse_array_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ArrayItem>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::DotDotDot, _)) = tokens.peek() {
        tokens.next();
        Ok(ArrayItem::Spread(parse_expression(tokens)?))
    } else {
        Ok(ArrayItem::Expression(parse_expression(tokens)?))
    }
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::LParen, line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    let expr = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen, line)?;

    Ok(expr)
}

/// Parses an identifier into a call or a parameter reference.
///
/// An identifier followed by `<` is a template call; `::` selects a
/// template from an aliased module and must be followed by an argument
/// list. A bare identifier is always a parameter reference; zero-argument
/// calls are written with explicit empty angle brackets, `Name<>`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the identifier.
///
/// # Returns
/// An [`Expr::Call`] or [`Expr::ParameterReference`] node.
///
/// # Errors
/// Returns a `ParseError` if a qualified name is not followed by an
/// argument list, or the argument list is malformed.
fn parse_call_or_reference<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    match tokens.peek() {
        Some((Token::ColonColon, _)) => {
            tokens.next();
            let callee = parse_identifier(tokens)?;
            expect_token(tokens, &Token::LAngle, line)?;
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RAngle)?;
            Ok(Expr::Call { module: Some(name.clone()),
                            callee,
                            arguments,
                            line })
        },
        Some((Token::LAngle, _)) => {
            tokens.next();
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RAngle)?;
            Ok(Expr::Call { module: None,
                            callee: name.clone(),
                            arguments,
                            line })
        },
        _ => Ok(Expr::ParameterReference { name: name.clone(),
                                           line }),
    }
}
