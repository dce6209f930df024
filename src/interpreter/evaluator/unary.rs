use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    session::InputKind,
};

impl Interpreter {
    /// Evaluates `Not[expr]`.
    ///
    /// `None` counts as false, so `Not[None]` is `True`.
    ///
    /// # Errors
    /// `ExpectedBoolean` for any other non-boolean operand.
    pub(crate) fn eval_negate(&mut self, expr: &Node, line: usize) -> EvalResult<Value> {
        match self.eval(expr)? {
            Value::None => Ok(Value::Bool(true)),
            value => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }

    /// Evaluates `Contains[expr]`: whether `last` contains the text.
    ///
    /// - A string contains every one of its substrings.
    /// - A list contains each of its elements.
    /// - Detections contain the names of their classes.
    ///
    /// Anything else contains nothing.
    ///
    /// # Errors
    /// `ExpectedString` if the needle is not a string.
    pub(crate) fn eval_contains(&mut self, expr: &Node, line: usize) -> EvalResult<Value> {
        let needle = self.eval(expr)?;
        let needle = needle.as_str(line)?;

        let found = match &self.session.last {
            Value::Str(text) => text.contains(needle),
            Value::List(items) => items.iter().any(|item| matches!(item, Value::Str(s) if s == needle)),
            Value::Detections(detections) => {
                detections.items
                          .iter()
                          .any(|d| detections.class_name(d).is_some_and(|name| name.eq_ignore_ascii_case(needle)))
            },
            _ => false,
        };

        Ok(Value::Bool(found))
    }

    /// Evaluates `Input[key]`.
    ///
    /// The key is recorded in `input_variables` so that a host can discover
    /// which inputs a script expects, even when the lookup fails.
    ///
    /// # Errors
    /// `UnknownInput` if the host did not supply a value for the key.
    pub(crate) fn eval_input(&mut self, key: &str, line: usize) -> EvalResult<Value> {
        self.session.input_variables.insert(key.to_string(), InputKind::Image);

        self.session
            .inputs
            .get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownInput { key: key.to_string(),
                                                        line })
    }

    /// Evaluates `left == right`, or `left != right` when `negated`.
    pub(crate) fn eval_equality(&mut self,
                                left: &Node,
                                right: &Node,
                                negated: bool)
                                -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        Ok(Value::Bool(left.loosely_equals(&right) != negated))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{error::Error, interpreter::value::handle::Image, vision::dry_run::DryRunVision};

    fn interpreter() -> Interpreter {
        Interpreter::new(Box::new(DryRunVision)).with_output(io::sink())
    }

    #[test]
    fn contains_searches_the_last_value() {
        let mut interpreter = interpreter();
        interpreter.run("x = \"a cat on a mat\"\nfound = Contains[\"cat\"]").unwrap();
        assert_eq!(interpreter.session.variables["found"], Value::Bool(true));

        interpreter.run("x = [\"dog\"]\nfound = Contains[\"cat\"]").unwrap();
        assert_eq!(interpreter.session.variables["found"], Value::Bool(false));
    }

    #[test]
    fn negation_treats_none_as_false() {
        let mut interpreter = interpreter();
        interpreter.run("a = Not[True]\nb = Not[Say[\"\"]]").unwrap();

        assert_eq!(interpreter.session.variables["a"], Value::Bool(false));
        assert_eq!(interpreter.session.variables["b"], Value::Bool(true));
    }

    #[test]
    fn equality_compares_numbers_by_value() {
        let mut interpreter = interpreter();
        interpreter.run("a = 2 == 2.0\nb = \"x\" != \"x\"").unwrap();

        assert_eq!(interpreter.session.variables["a"], Value::Bool(true));
        assert_eq!(interpreter.session.variables["b"], Value::Bool(false));
    }

    #[test]
    fn inputs_are_recorded_even_when_missing() {
        let mut interpreter = interpreter().with_input("photo", Image::new("photo", 10, 10));
        interpreter.run("Load[Input[\"photo\"]]").unwrap();
        assert_eq!(interpreter.session.image_stack.len(), 1);

        let error = interpreter.run("x = Input[\"other\"]").unwrap_err();
        assert!(matches!(error, Error::Runtime(RuntimeError::UnknownInput { .. })));
        assert_eq!(interpreter.session.input_variables.keys().collect::<Vec<_>>(), ["other", "photo"]);
    }
}
