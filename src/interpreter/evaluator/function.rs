use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    suggest::suggest,
};

impl Interpreter {
    /// Stores a function body under its name.
    ///
    /// Nothing is evaluated. A later `Make` with the same name replaces the
    /// body.
    pub(crate) fn eval_make(&mut self, name: &str, body: &[Node], line: usize) -> Value {
        debug!(name, line, statements = body.len(), "defining function");
        self.session.functions.insert(name.to_string(), body.to_vec());
        Value::None
    }

    /// Runs a function as a sequence of statements.
    ///
    /// The body is evaluated against the shared session: names it reads
    /// resolve to whatever they are bound to when `Run` executes, and
    /// bindings it makes remain visible afterwards.
    ///
    /// # Errors
    /// - `UnknownUserFunction` (or `UnknownFunction` with suggestions) if no
    ///   function has that name.
    /// - `RecursionLimit` if functions nest too deeply.
    /// - Any error raised by the body.
    pub(crate) fn eval_run(&mut self, name: &str, line: usize) -> EvalResult<Value> {
        let body = self.function_body(name, line)?;
        debug!(name, line, "running function");
        self.eval_nested(name, &body, line)?;
        Ok(Value::None)
    }

    /// Runs a function inline and yields the value of its last statement.
    ///
    /// # Errors
    /// Same as [`Interpreter::eval_run`].
    pub(crate) fn eval_function_ref(&mut self, name: &str, line: usize) -> EvalResult<Value> {
        let body = self.function_body(name, line)?;
        debug!(name, line, "evaluating function inline");
        self.eval_nested(name, &body, line)
    }

    /// Fetches a copy of a stored function body.
    ///
    /// A name that is close to a vocabulary entry is more likely a misspelled
    /// operation than a missing function, so it is reported as an unknown
    /// operation with suggestions.
    fn function_body(&self, name: &str, line: usize) -> EvalResult<Vec<Node>> {
        if let Some(body) = self.session.functions.get(name) {
            return Ok(body.clone());
        }

        let suggestions = suggest(name, self.config.max_suggestion_distance);
        if suggestions.is_empty() {
            return Err(RuntimeError::UnknownUserFunction { name: name.to_string(),
                                                           line });
        }
        Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                            line,
                                            suggestions })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, rc::Rc};

    use super::*;
    use crate::{error::Error, vision::dry_run::DryRunVision};

    #[derive(Clone, Default)]
    struct Captured(Rc<RefCell<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(source: &str) -> (Interpreter, String) {
        let captured = Captured::default();
        let mut interpreter = Interpreter::new(Box::new(DryRunVision)).with_output(captured.clone());
        interpreter.run(source).unwrap();

        let text = String::from_utf8(captured.0.borrow().clone()).unwrap();
        (interpreter, text)
    }

    #[test]
    fn bodies_resolve_names_when_run() {
        let (_, printed) = run("x = 1\nMake[F]\n  Say[x]\nx = 2\nRun[F]\n");
        assert_eq!(printed, "2\n");
    }

    #[test]
    fn inline_reference_yields_the_last_statement() {
        let (interpreter, _) = run("Make[Pick]\n  y = 3\nz = Pick[]\n");

        assert_eq!(interpreter.session.variables["z"], Value::Integer(3));
        assert_eq!(interpreter.session.variables["y"], Value::Integer(3));
    }

    #[test]
    fn later_definitions_replace_earlier_ones() {
        let (_, printed) = run("Make[F: Say[\"a\"]]\nMake[F: Say[\"b\"]]\nRun[F]");

        assert_eq!(printed, "b\n");
    }

    #[test]
    fn missing_functions_are_reported() {
        let mut interpreter = Interpreter::new(Box::new(DryRunVision));

        assert!(matches!(interpreter.run("Run[Nothing]"),
                         Err(Error::Runtime(RuntimeError::UnknownUserFunction { line: 1, .. }))));
        assert!(matches!(interpreter.run("x = Sayy[]"),
                         Err(Error::Runtime(RuntimeError::UnknownFunction { ref suggestions, .. }))
                             if suggestions.contains(&"Say".to_string())));
    }

    #[test]
    fn runaway_recursion_is_an_error() {
        let mut interpreter = Interpreter::new(Box::new(DryRunVision)).with_output(io::sink());

        let error = interpreter.run("Make[F]\n  Run[F]\nRun[F]\n").unwrap_err();
        assert!(matches!(error,
                         Error::Runtime(RuntimeError::RecursionLimit { ref name, limit: 64, line: 2 }) if name == "F"));

        let error = interpreter.run("Make[G]\n  x = G[]\nx = G[]\n").unwrap_err();
        assert!(matches!(error, Error::Runtime(RuntimeError::RecursionLimit { .. })));

        interpreter.run("Make[F]\n  y = 1\nRun[F]").unwrap();
        assert_eq!(interpreter.session.variables["y"], Value::Integer(1));
    }
}
