/// The evaluator walks the syntax tree against a session.
///
/// The evaluator runs statements in order, resolves variables and user
/// functions, checks builtin arity and hands each builtin call to its handler.
/// Handlers update the session stacks and delegate the heavy lifting to a
/// [`crate::vision::Vision`] backend.
///
/// # Responsibilities
/// - Evaluates every node kind, including `If`, `In` loops and `Make`/`Run`.
/// - Keeps `last`, `history` and the other session bookkeeping current.
/// - Reports runtime errors with the line they occurred on.
pub mod evaluator;
/// The lexer turns VisionScript source into tokens.
///
/// Each token carries its line and column, so that the parser can report
/// exactly where a script went wrong.
pub mod lexer;
/// The parser builds the syntax tree from tokens.
///
/// Statements are separated by newlines; blocks are introduced by a trailing
/// `:` or by lines indented deeper than the header.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`] trees.
/// - Resolves operation names and aliases, rejecting unknown ones with
///   suggestions.
/// - Reports grammar errors with line and column.
pub mod parser;
/// Runtime values and the opaque handles the vision backend hands out.
pub mod value;
