use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    suggest::suggest,
    vocabulary::{Builtin, resolve_builtin},
};

impl Interpreter {
    /// Evaluates a builtin call.
    ///
    /// The surface name is resolved through the alias table first, so
    /// `Find[...]` and `Detect[...]` are indistinguishable from here on.
    /// Arguments are evaluated left to right and the arity is checked before
    /// the handler runs.
    ///
    /// After a successful call the canonical name is appended to the history,
    /// `last_function_type` and `last_function_args` describe the call, and a
    /// result other than `None` becomes both `last` and `output`. `Reset` is
    /// the exception: it leaves the session exactly as a fresh one.
    ///
    /// # Parameters
    /// - `name`: Operation name as written.
    /// - `arguments`: Unevaluated argument nodes.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `UnknownFunction` if the name is not a builtin or alias.
    /// - `ArgumentCountMismatch` if the arity does not fit.
    /// - Any error raised by an argument or by the handler. A failed call is
    ///   not recorded in the history.
    pub(crate) fn eval_call(&mut self, name: &str, arguments: &[Node], line: usize) -> EvalResult<Value> {
        let builtin = resolve_builtin(name).ok_or_else(|| {
                          RuntimeError::UnknownFunction { name: name.to_string(),
                                                          line,
                                                          suggestions: suggest(name,
                                                                               self.config
                                                                                   .max_suggestion_distance) }
                      })?;

        let args = arguments.iter().map(|arg| self.eval(arg)).collect::<EvalResult<Vec<_>>>()?;

        let arity = builtin.arity();
        if !arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: builtin.display_name(),
                                                             expected: arity,
                                                             found: args.len(),
                                                             line });
        }

        debug!(builtin = builtin.canonical_name(), arguments = args.len(), line, "dispatching");
        let result = self.dispatch(builtin, &args, line)?;

        if builtin == Builtin::Reset {
            return Ok(Value::None);
        }

        self.session.history.push(builtin);
        self.session.last_function_type = Some(builtin);
        self.session.last_function_args = args;
        if !result.is_none() {
            self.session.last = result.clone();
            self.session.output = result.clone();
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{error::Error, vision::dry_run::DryRunVision};

    fn interpreter() -> Interpreter {
        Interpreter::new(Box::new(DryRunVision)).with_output(io::sink())
    }

    #[test]
    fn successful_calls_are_recorded() {
        let mut interpreter = interpreter();
        interpreter.run("Load[\"a.png\"]\nfind[\"cat\"]").unwrap();

        assert_eq!(interpreter.session.history, [Builtin::Load, Builtin::Detect]);
        assert_eq!(interpreter.session.last_function_type, Some(Builtin::Detect));
        assert_eq!(interpreter.session.last_function_args, [Value::from("cat")]);
        assert!(matches!(interpreter.session.output, Value::Detections(_)));
    }

    #[test]
    fn arity_is_checked_before_dispatch() {
        let mut interpreter = interpreter();
        let error = interpreter.run("Load[\"a.png\"]\nResize[10]").unwrap_err();

        assert_eq!(error.to_string(),
                   "Error on line 2: Resize takes 2 argument(s), but 1 were given.");
        assert_eq!(interpreter.session.history, [Builtin::Load]);
    }

    #[test]
    fn failed_calls_are_not_recorded() {
        let mut interpreter = interpreter();
        let error = interpreter.run("Detect[]").unwrap_err();

        assert!(matches!(error, Error::Runtime(RuntimeError::EmptyStack { stack: "image", .. })));
        assert!(interpreter.session.history.is_empty());
    }

    #[test]
    fn side_effect_only_calls_keep_last() {
        let mut interpreter = interpreter();
        interpreter.run("x = 7\nSetConfidence[80]").unwrap();

        assert_eq!(interpreter.session.last, Value::Integer(7));
        assert_eq!(interpreter.session.history, [Builtin::SetConfidence]);
    }
}
