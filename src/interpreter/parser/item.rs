use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::{AstItem, ImportDeclaration, ParameterDecl, TypeDeclaration},
    error::ParseError,
    interpreter::{
        lexer::{LexerExtras, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Tokenizes and parses a whole source text into its top-level items.
///
/// This is the shared entry point for the root program and for every
/// imported module: the module loader parses imported files through the
/// same path.
///
/// # Parameters
/// - `source`: The raw source text.
///
/// # Returns
/// The list of parsed top-level items, in source order.
///
/// # Errors
/// Returns a `ParseError` if the source contains unrecognized characters or
/// any item fails to parse.
pub fn parse_source(source: &str) -> Result<Vec<AstItem>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line:  lexer.extras.line, });
        }
    }

    let mut iter = tokens.iter().peekable();
    parse_program(&mut iter)
}

/// Parses a sequence of top-level items until the token stream is
/// exhausted.
///
/// An item is one of:
/// - an import declaration,
/// - a template declaration (optionally exported),
/// - a standalone expression.
///
/// Items may optionally be separated by `;`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// The parsed [`AstItem`] list.
fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<AstItem>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();

    loop {
        while let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }
        let Some((token, _)) = tokens.peek() else {
            break;
        };

        match token {
            Token::Import => items.push(AstItem::Import(parse_import(tokens)?)),
            Token::Export | Token::Type => items.push(AstItem::Type(parse_type_declaration(tokens)?)),
            _ => items.push(AstItem::Expression(parse_expression(tokens)?)),
        }
    }

    Ok(items)
}

/// Parses a template declaration.
///
/// Syntax:
/// ```text
///     export? type <Name> "<" <params> ">" "=" <expression>
/// ```
/// Each parameter may carry a default value after `=`. The angle-bracket
/// list is mandatory even when empty, mirroring the call syntax: a bare
/// identifier in expression position is always a parameter reference.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `export` or `type`.
///
/// # Returns
/// The parsed [`TypeDeclaration`].
///
/// # Errors
/// Returns a `ParseError` if the name, parameter list, `=`, or body is
/// malformed.
fn parse_type_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);

    let exported = if let Some((Token::Export, _)) = tokens.peek() {
        tokens.next();
        true
    } else {
        false
    };

    expect_token(tokens, &Token::Type, line)?;
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LAngle, line)?;
    let parameters = parse_comma_separated(tokens, parse_parameter, &Token::RAngle)?;
    expect_token(tokens, &Token::Equals, line)?;
    let body = parse_expression(tokens)?;

    Ok(TypeDeclaration { name,
                         parameters,
                         body,
                         exported,
                         line })
}

/// Parses a single template parameter with its optional default.
///
/// Grammar: `parameter := identifier ("=" expression)?`
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParameterDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let name = parse_identifier(tokens)?;

    let default = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(ParameterDecl { name, default, line })
}

/// Parses an import declaration.
///
/// Supported forms:
///
/// - `import { A, B } from "./path"`: specific names, callable
///   unqualified.
/// - `import alias from "./path"`: module alias for qualified calls.
/// - `import alias, { A } from "./path"`: both at once.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `import` keyword.
///
/// # Returns
/// The parsed [`ImportDeclaration`].
///
/// # Errors
/// Returns a `ParseError` if the name list, `from`, or the quoted path is
/// malformed.
fn parse_import<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ImportDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Import, line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    let (alias, names) = match tokens.peek() {
        Some((Token::LBrace, _)) => (None, parse_braced_names(tokens)?),
        Some((Token::Identifier(_), _)) => {
            let alias = parse_identifier(tokens)?;
            let names = if let Some((Token::Comma, _)) = tokens.peek() {
                tokens.next();
                parse_braced_names(tokens)?
            } else {
                Vec::new()
            };
            (Some(alias), names)
        },
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected import names, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    expect_token(tokens, &Token::From, line)?;

    let path = match tokens.next() {
        Some((Token::String(path), _)) => path.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected module path string, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    Ok(ImportDeclaration { path,
                           alias,
                           names,
                           line })
}

/// Parses a braced, comma-separated list of imported names.
///
/// Grammar: `names := "{" (identifier ("," identifier)*)? "}"`
fn parse_braced_names<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    expect_token(tokens, &Token::LBrace, line)?;
    parse_comma_separated(tokens, parse_identifier, &Token::RBrace)
}
