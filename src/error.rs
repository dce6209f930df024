/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected characters and tokens, premature end of input, oversized
/// literals and misspelled operation names.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unresolved
/// names, arity and type mismatches, empty stacks and backend failures.
pub mod runtime_error;
/// Host-facing diagnostics.
///
/// A [`Diagnostic`] is the structured form of a parse or name-resolution
/// error. Hosts render it instead of matching on error variants.
pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of [`crate::run_script`]: either the script did not parse or it
/// failed while running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the diagnostic for this error, if it has one.
    ///
    /// Parse errors always have one. Runtime errors have one only when they
    /// are about an unresolved name.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Self::Parse(e) => Some(e.diagnostic()),
            Self::Runtime(e) => e.diagnostic(),
        }
    }
}
