//! # visionscript
//!
//! visionscript is the language engine of VisionScript, a small
//! stack-oriented scripting language for computer vision. Scripts are short
//! sequences of operations such as `Load`, `Detect` and `Say`, threaded
//! through an implicit session that holds the loaded images, detections and
//! the value each statement produced.
//!
//! The engine parses scripts, checks them and evaluates them. The vision
//! work itself is delegated to a [`vision::Vision`] backend supplied by the
//! host.

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

use crate::{
    ast::Program,
    config::DEFAULT_SUGGESTION_DISTANCE,
    error::{Error, ParseError},
    interpreter::{evaluator::core::Interpreter, parser::core::parse_program},
    session::Session,
    vision::Vision,
};

/// Defines the structure of parsed scripts.
///
/// A script parses to a [`ast::Program`], a list of [`ast::Node`] statements.
/// Every node carries the source line it came from.
pub mod ast;
/// Engine settings: default confidence, suggestion distance, search size
/// and import extension.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// Every error renders as `Error on line N: ...`. Parse errors and errors
/// about unresolved names also convert into a structured
/// [`error::Diagnostic`].
pub mod error;
/// Lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Defines the runtime values scripts work with.
/// - Provides the [`interpreter::evaluator::core::Interpreter`] hosts drive.
pub mod interpreter;
/// The state a script reads and writes: stacks, variables, functions, inputs
/// and bookkeeping.
pub mod session;
/// "Did you mean" suggestions for misspelled names.
pub mod suggest;
/// General utilities for safe numeric conversion.
pub mod util;
/// The boundary between the language and the vision work it sequences.
pub mod vision;
/// The fixed vocabulary: builtin operations, keywords and aliases.
pub mod vocabulary;

/// Parses a script without evaluating it.
///
/// Use this to validate a script before running it, for instance in an
/// editor.
///
/// # Errors
/// Returns the first `ParseError` found. Unknown operation names come with
/// suggestions from the vocabulary.
///
/// # Examples
/// ```
/// use visionscript::parse;
///
/// let program = parse("Load[\"photo.jpg\"]\nDetect[\"person\"]\nSay[]").unwrap();
/// assert_eq!(program.statements.len(), 3);
///
/// assert!(parse("Detcet[\"person\"]").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_program(source, DEFAULT_SUGGESTION_DISTANCE)
}

/// Runs a script in a fresh session and returns the session it leaves
/// behind.
///
/// `Say` and `Help` write to standard output. Hosts that need to capture
/// output, supply inputs or run several scripts in one session should build
/// an [`Interpreter`] instead.
///
/// # Errors
/// Returns [`Error::Parse`] if the script does not parse and
/// [`Error::Runtime`] if it fails while running.
///
/// # Examples
/// ```
/// use visionscript::{run_script, vision::dry_run::DryRunVision};
///
/// let session = run_script("x = 3\nx", Box::new(DryRunVision)).unwrap();
/// assert_eq!(session.last.to_string(), "3");
///
/// // 'y' is not defined
/// assert!(run_script("y", Box::new(DryRunVision)).is_err());
/// ```
pub fn run_script(source: &str, vision: Box<dyn Vision>) -> Result<Session, Error> {
    let mut interpreter = Interpreter::new(vision);
    interpreter.run(source)?;

    Ok(interpreter.session)
}
