/// Represents a literal value written directly in source code.
///
/// `LiteralValue` covers the constants the lexer can produce: integers, reals,
/// booleans and strings. Lists are not literals; they are built from child
/// nodes by [`Node::ListLit`] so that their elements may be any expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal: `True` or `False`.
    Bool(bool),
    /// A string literal with escapes already resolved.
    Str(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A node of the concrete syntax tree.
///
/// The parser builds these nodes once per parse; they are immutable
/// afterwards. The evaluator only borrows them, apart from function bodies,
/// which are cloned into the session when a `Make` statement runs.
///
/// Every variant records the 1-based source line it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A constant such as `"img.png"`, `42`, `0.5` or `True`.
    Literal {
        /// The literal value.
        value: LiteralValue,
        /// The source line where the literal appears.
        line:  usize,
    },
    /// A bracketed list such as `["cat", "dog"]`.
    ListLit {
        /// The element expressions, in source order.
        elements: Vec<Self>,
        /// The source line of the opening bracket.
        line:     usize,
    },
    /// A bare identifier used as a value, such as `x` in `Say[x]`.
    Variable {
        /// The variable name.
        name: String,
        /// The source line where the variable is referenced.
        line: usize,
    },
    /// A binding such as `x = Load["img.png"]`.
    VarDecl {
        /// The variable name.
        name:  String,
        /// The bound expression.
        value: Box<Self>,
        /// The source line of the declaration.
        line:  usize,
    },
    /// An operation call such as `Detect["person"]`.
    ///
    /// `name` keeps the surface spelling (which may be an alias); it is
    /// resolved to a builtin only when the call is evaluated.
    Call {
        /// The operation name as written.
        name:      String,
        /// The argument expressions.
        arguments: Vec<Self>,
        /// The source line of the call.
        line:      usize,
    },
    /// `If[condition]` followed by an optional body.
    If {
        /// The condition expression.
        condition: Box<Self>,
        /// Statements evaluated when the condition holds.
        body:      Vec<Self>,
        /// The source line of the `If` keyword.
        line:      usize,
    },
    /// `In["folder", file]` followed by a body run once per directory entry.
    ForInDirectory {
        /// Expression that evaluates to the directory path.
        path:    Box<Self>,
        /// Optional variable bound to the active file on every iteration.
        binding: Option<String>,
        /// Statements evaluated for each entry.
        body:    Vec<Self>,
        /// The source line of the `In` keyword.
        line:    usize,
    },
    /// `Make[Name]` followed by the function body.
    MakeFunction {
        /// The function name.
        name: String,
        /// The stored, unevaluated body.
        body: Vec<Self>,
        /// The source line of the `Make` keyword.
        line: usize,
    },
    /// `Run[Name]`.
    RunFunction {
        /// The function name.
        name: String,
        /// The source line of the `Run` keyword.
        line: usize,
    },
    /// `Name[]` where `Name` is not a builtin; evaluates a user function
    /// inline and yields the value of its last statement.
    LiteralFunctionRef {
        /// The function name.
        name: String,
        /// The source line of the reference.
        line: usize,
    },
    /// `Not[expr]`.
    Negate {
        /// The negated expression.
        expr: Box<Self>,
        /// The source line of the `Not` keyword.
        line: usize,
    },
    /// `Contains["text"]`; tests whether the last value contains the text.
    Contains {
        /// The expression that evaluates to the needle.
        expr: Box<Self>,
        /// The source line of the `Contains` keyword.
        line: usize,
    },
    /// `Input["key"]`; reads a value supplied by the host.
    Input {
        /// The input key.
        key:  String,
        /// The source line of the `Input` keyword.
        line: usize,
    },
    /// `left == right` or `left != right`.
    Equality {
        /// The left operand.
        left:    Box<Self>,
        /// The right operand.
        right:   Box<Self>,
        /// `true` for `!=`.
        negated: bool,
        /// The source line of the operator.
        line:    usize,
    },
    /// A `#` comment. Kept in the tree so that a script round-trips through
    /// `--debug` output with its comments in place.
    Comment {
        /// The comment text without the leading `#`.
        text: String,
        /// The source line of the comment.
        line: usize,
    },
}

impl Node {
    /// Returns the source line this node was parsed from.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::ListLit { line, .. }
            | Self::Variable { line, .. }
            | Self::VarDecl { line, .. }
            | Self::Call { line, .. }
            | Self::If { line, .. }
            | Self::ForInDirectory { line, .. }
            | Self::MakeFunction { line, .. }
            | Self::RunFunction { line, .. }
            | Self::LiteralFunctionRef { line, .. }
            | Self::Negate { line, .. }
            | Self::Contains { line, .. }
            | Self::Input { line, .. }
            | Self::Equality { line, .. }
            | Self::Comment { line, .. } => *line,
        }
    }
}

/// The result of a successful parse: the top-level statements of a script in
/// source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements.
    pub statements: Vec<Node>,
}
