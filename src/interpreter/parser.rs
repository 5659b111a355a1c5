/// Core expression parsing.
///
/// Contains the expression grammar: primaries, calls, array literals,
/// conditionals, and grouping.
pub mod core;

/// Top-level item parsing.
///
/// Parses whole programs: template declarations, import declarations, and
/// standalone expressions.
pub mod item;

/// Extends-pattern parsing.
///
/// Parses the bracketed patterns used in conditional conditions, including
/// infer and skip capture markers.
pub mod pattern;

/// Utility functions for parsing.
///
/// Provides shared helpers for token expectations, identifiers, and
/// comma-separated lists.
pub mod utils;
