/// The kind of problem a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The lexer met a character that starts no token.
    UnexpectedCharacter,
    /// A well-formed token appeared where the grammar does not allow it.
    UnexpectedToken,
    /// A call named an operation or function that does not exist.
    UnknownFunction,
    /// A variable was read before it was bound.
    UnknownVariable,
}

/// A structured description of a parse or name-resolution failure.
///
/// This is the surface hosts render: it carries the position, the offending
/// text and, for unknown names, the "did you mean" candidates in vocabulary
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind:           DiagnosticKind,
    /// 1-based source line.
    pub line:           usize,
    /// 1-based source column. Runtime name errors only know their line.
    pub column:         Option<usize>,
    /// The character, token or name at fault.
    pub offending_text: String,
    /// Suggested replacements, possibly empty.
    pub suggestions:    Vec<String>,
}
