use thiserror::Error;

use crate::{
    error::diagnostic::{Diagnostic, DiagnosticKind},
    suggest::unknown_function_message,
};

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("Syntax error on line {line}, column {column}.\nUnexpected character: {character:?}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Syntax error on line {line}, column {column}.\nUnexpected token: {token}")]
    UnexpectedToken {
        /// The token encountered, as written.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Syntax error on line {line}, column {column}.\nUnexpected end of input.")]
    UnexpectedEndOfInput {
        /// The line of the last token read.
        line:   usize,
        /// The column just past the last token read.
        column: usize,
    },
    /// Brackets or indented blocks nest deeper than the parser accepts.
    #[error("Syntax error on line {line}, column {column}.\nNesting is too deep.")]
    NestingTooDeep {
        /// The source line where the limit was crossed.
        line:   usize,
        /// The source column where the limit was crossed.
        column: usize,
    },
    /// A call with arguments names something that is not in the vocabulary.
    #[error("Error on line {line}: {}", unknown_function_message(.name, .suggestions))]
    UnknownFunction {
        /// The name as written.
        name:        String,
        /// The source line where the error occurred.
        line:        usize,
        /// The source column of the name.
        column:      usize,
        /// Close vocabulary entries, in vocabulary order.
        suggestions: Vec<String>,
    },
    /// Tried to bind or define a name the vocabulary reserves.
    #[error("Error on line {line}: Identifier {name} is reserved.")]
    IdentifierReserved {
        /// The reserved name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column of the name.
        column: usize,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl ParseError {
    /// Returns the source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::NestingTooDeep { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::IdentifierReserved { line, .. }
            | Self::LiteralTooLarge { line, .. } => *line,
        }
    }

    /// Converts the error into the host-facing [`Diagnostic`].
    ///
    /// # Example
    /// ```
    /// use visionscript::{error::DiagnosticKind, parse};
    ///
    /// let error = parse("Sayy[\"hi\"]").unwrap_err();
    /// let diagnostic = error.diagnostic();
    ///
    /// assert_eq!(diagnostic.kind, DiagnosticKind::UnknownFunction);
    /// assert!(diagnostic.suggestions.contains(&"Say".to_string()));
    /// ```
    #[must_use]
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            Self::UnexpectedCharacter { character,
                                        line,
                                        column, } => {
                Diagnostic { kind:           DiagnosticKind::UnexpectedCharacter,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: character.to_string(),
                             suggestions:    Vec::new(), }
            },
            Self::UnexpectedToken { token, line, column } => {
                Diagnostic { kind:           DiagnosticKind::UnexpectedToken,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: token.clone(),
                             suggestions:    Vec::new(), }
            },
            Self::UnexpectedEndOfInput { line, column } | Self::NestingTooDeep { line, column } => {
                Diagnostic { kind:           DiagnosticKind::UnexpectedToken,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: String::new(),
                             suggestions:    Vec::new(), }
            },
            Self::UnknownFunction { name,
                                    line,
                                    column,
                                    suggestions, } => {
                Diagnostic { kind:           DiagnosticKind::UnknownFunction,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: name.clone(),
                             suggestions:    suggestions.clone(), }
            },
            Self::IdentifierReserved { name, line, column } => {
                Diagnostic { kind:           DiagnosticKind::UnexpectedToken,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: name.clone(),
                             suggestions:    Vec::new(), }
            },
            Self::LiteralTooLarge { literal, line, column } => {
                Diagnostic { kind:           DiagnosticKind::UnexpectedToken,
                             line:           *line,
                             column:         Some(*column),
                             offending_text: literal.clone(),
                             suggestions:    Vec::new(), }
            },
        }
    }
}
