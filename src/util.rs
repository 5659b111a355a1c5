/// Text helpers.
///
/// This module provides reusable routines for string literal handling that
/// are shared between the lexer, the evaluator, and the value renderer.
/// These include quote escaping and the mapping between character code
/// points and characters used by the string encoding.
pub mod text;
