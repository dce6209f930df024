use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{
    error::{
        ParseError,
        diagnostic::{Diagnostic, DiagnosticKind},
    },
    suggest::unknown_function_message,
    vision::VisionError,
    vocabulary::Arity,
};

/// Represents all errors that can occur during evaluation and runtime.
///
/// A runtime error aborts the current script only. Session changes made by
/// statements that already ran are kept.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an operation that does not exist.
    #[error("Error on line {line}: {}", unknown_function_message(.name, .suggestions))]
    UnknownFunction {
        /// The name as written.
        name:        String,
        /// The source line where the error occurred.
        line:        usize,
        /// Close vocabulary entries, in vocabulary order.
        suggestions: Vec<String>,
    },
    /// `Run` named a function that was never made.
    #[error("Error on line {line}: Function {name} does not exist.")]
    UnknownUserFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Functions or imports nested deeper than the configured limit.
    #[error("Error on line {line}: {name} nests more than {limit} calls deep.")]
    RecursionLimit {
        /// The function or script being entered when the limit was hit.
        name:  String,
        /// The configured limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `Input` named a key the host did not supply.
    #[error("Error on line {line}: Input {key} does not exist.")]
    UnknownInput {
        /// The input key.
        key:  String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a builtin.
    #[error("Error on line {line}: {name} takes {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// Display name of the builtin.
        name:     &'static str,
        /// The accepted arity.
        expected: Arity,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    #[error("Error on line {line}: Expected boolean.")]
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string value was expected, but not found.
    #[error("Error on line {line}: Expected string.")]
    ExpectedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operation needed a stack entry, but the stack was empty.
    #[error("Error on line {line}: No {stack} to work with.")]
    EmptyStack {
        /// Name of the stack, such as `image`.
        stack: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An operation needed detections as the last value.
    #[error("Error on line {line}: The last result is not a set of detections.")]
    NoDetections {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operation needed more images than are loaded.
    #[error("Error on line {line}: Not enough images to compare. Needed {needed}, found {found}.")]
    NotEnoughImages {
        /// Number of images required.
        needed: usize,
        /// Number of images loaded.
        found:  usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Tried to access an item outside the allowed bounds.
    #[error("Error on line {line}: Index out of bounds. Length is {len}, but found {found} instead.")]
    IndexOutOfBounds {
        /// The length of the indexed value.
        len:   usize,
        /// The index that was actually requested.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A number was too large to be used as a count, size or index.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A negative number was used as a count, size or index.
    #[error("Error on line {line}: Literal is too small.")]
    LiteralTooSmall {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A directory could not be listed.
    #[error("Error on line {line}: Could not list directory {}.", .path.display())]
    Directory {
        /// The directory path.
        path:   PathBuf,
        /// The source line where the error occurred.
        line:   usize,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// An imported script could not be read.
    #[error("Error on line {line}: Could not read {}.", .path.display())]
    ImportRead {
        /// The script path.
        path:   PathBuf,
        /// The source line where the error occurred.
        line:   usize,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// An imported script failed to parse.
    #[error("Error on line {line}: Could not import {}.", .path.display())]
    Import {
        /// The script path.
        path:   PathBuf,
        /// The source line where the error occurred.
        line:   usize,
        /// The parse failure inside the imported script.
        #[source]
        source: ParseError,
    },
    /// A builtin's backend failed.
    #[error("Error on line {line}: {name} failed: {source}")]
    Handler {
        /// Display name of the builtin.
        name:   &'static str,
        /// The source line where the error occurred.
        line:   usize,
        /// The backend failure.
        #[source]
        source: VisionError,
    },
    /// Writing to the output sink failed.
    #[error("Error on line {line}: Could not write output.")]
    Output {
        /// The source line where the error occurred.
        line:   usize,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

impl RuntimeError {
    /// Converts a name-resolution failure into the host-facing
    /// [`Diagnostic`].
    ///
    /// Returns `None` for errors that are not about names; those are only
    /// reported through their `Display` text.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        let (kind, name, line, suggestions) = match self {
            Self::UnknownFunction { name,
                                    line,
                                    suggestions, } => {
                (DiagnosticKind::UnknownFunction, name, *line, suggestions.clone())
            },
            Self::UnknownUserFunction { name, line } => {
                (DiagnosticKind::UnknownFunction, name, *line, Vec::new())
            },
            Self::UnknownVariable { name, line } => {
                (DiagnosticKind::UnknownVariable, name, *line, Vec::new())
            },
            _ => return None,
        };

        Some(Diagnostic { kind,
                          line,
                          column: None,
                          offending_text: name.clone(),
                          suggestions })
    }
}
