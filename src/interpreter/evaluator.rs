/// Core evaluation logic and interpreter state.
///
/// Contains the tree walker, the `Interpreter` that owns the session and the
/// vision backend, and the statement dispatch.
pub mod core;

/// Evaluation of `If` and `In`.
///
/// `If` either continues, skips its body or halts the remaining program;
/// `In` runs its body once per directory entry with a context frame set.
pub mod control;

/// User-defined functions.
///
/// Handles `Make`, `Run` and inline `Name[]` references, all evaluated
/// against the shared session.
pub mod function;

/// Unary forms and equality.
///
/// Implements `Not`, `Contains`, `Input` and `==` / `!=`. None of these touch
/// the call history.
pub mod unary;

/// Builtin calls.
///
/// Resolves aliases, checks arity and records every successful call in the
/// session history.
pub mod call;

/// The builtin dispatch table and its handlers.
pub mod builtin;

/// Utility functions for evaluation.
///
/// Provides argument accessors shared by the builtin handlers.
pub mod utils;
