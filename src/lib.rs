//! # inferra
//!
//! inferra is an interpreter for a declarative, structural pattern-matching
//! language written in Rust. Programs declare parameterized templates whose
//! bodies destructure and rebuild values made of an indivisible unit and
//! ordered sequences, with support for variadic captures, lazy parameter
//! defaults, and cross-module imports.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    ast::AstItem,
    interpreter::{
        evaluator::core::{Environment, Evaluator},
        parser::item::parse_source,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression, pattern, and declaration types for all language
///   constructs.
/// - Attaches source locations to AST nodes for error reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and carries
/// detailed information about failures, including error kinds, descriptions,
/// and source locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the
/// public API for interpreting and executing programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities and text helpers.
///
/// This module provides reusable helpers used throughout the interpreter,
/// parser, and renderer, such as string escape handling and the mapping
/// between character codes and characters.
///
/// # Responsibilities
/// - Resolve and apply quote escapes in string literals.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Evaluates a program and returns its report.
///
/// This function parses the provided source, builds the module context for
/// `path` (imports are resolved relative to its directory, loading the full
/// reachable import graph up front), and evaluates every top-level
/// expression in program order with an empty environment. The report
/// contains one `index> outcome` line per expression, where the outcome is
/// the normalized, rendered value or the error message. Expressions are
/// evaluated independently: one failing expression does not abort its
/// siblings.
///
/// # Errors
/// Returns an error if the source fails to parse or the module context
/// cannot be built (unreadable or unparsable import, missing export, or an
/// import cycle). Runtime errors of individual expressions are part of the
/// report instead.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use inferra::get_result;
///
/// let source = "type Add<N1, N2> = [...N1, ...N2]
///               Add<5, 8>";
/// let report = get_result(source, Path::new("script.inferra")).unwrap();
/// assert_eq!(report, "0> 13");
///
/// // Runtime failures are reported per expression.
/// let report = get_result("Missing<1>", Path::new("script.inferra")).unwrap();
/// assert_eq!(report, "0> Error on line 1: Template 'Missing' not found.");
/// ```
pub fn get_result(source: &str, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let items = parse_source(source)?;

    let mut evaluator = Evaluator::new();
    let context = evaluator.context_for(path, &items)?;

    let environment = Environment::new();
    let mut report = String::new();
    let mut index = 0;

    for item in &items {
        if let AstItem::Expression(expr) = item {
            let outcome = match evaluator.eval(expr, &environment, &context) {
                Ok(value) => value.normalize().to_string(),
                Err(e) => e.to_string(),
            };
            report.push_str(&format!("{index}> {outcome}\n"));
            index += 1;
        }
    }

    Ok(report.trim_end().to_string())
}
