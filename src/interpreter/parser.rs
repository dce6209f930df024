/// Parser entry points and expression parsing.
///
/// Provides the top-level `parse_program` loop, the `ParseResult` alias and
/// the entry point for expressions.
pub mod core;

/// Statement parsing.
///
/// Handles comments, variable declarations and the `Make`, `Run`, `If` and
/// `In` statement forms, and checks that each line ends cleanly.
pub mod statement;

/// Block parsing.
///
/// Parses the body that follows a `Make`, `If` or `In` header, whether written
/// inline after a colon or as indented lines below the header.
pub mod block;

/// Equality parsing.
///
/// Handles the `==` and `!=` operators used by conditions.
pub mod binary;

/// Primary expression parsing.
///
/// Parses literals, lists, variables, calls, user function references and
/// the `Not`, `Contains` and `Input` forms.
pub mod unary;

/// Shared parsing helpers.
///
/// Comma-separated lists, identifiers, expected tokens and error builders.
pub mod utils;
