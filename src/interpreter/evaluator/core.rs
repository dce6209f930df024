use std::io::{self, Write};

use tracing::trace;

use crate::{
    ast::{Node, Program},
    config::Config,
    error::{Error, ParseError, RuntimeError},
    interpreter::{parser::core::parse_program, value::core::Value},
    session::Session,
    vision::Vision,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Why the evaluator stopped before the end of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// An `If` condition was `False`.
    Halt,
    /// The script called `Exit[]`.
    Exit,
}

/// Evaluates programs against one session.
///
/// The interpreter exclusively owns the [`Session`], the [`Vision`] backend
/// that builtins delegate to, and the sink `Say` and `Help` write to. It is
/// created once and reused for every script of a session; `Import` evaluates
/// nested scripts on the same instance.
///
/// ## Usage
/// ```
/// use visionscript::{interpreter::evaluator::core::Interpreter, vision::dry_run::DryRunVision};
///
/// let mut interpreter = Interpreter::new(Box::new(DryRunVision)).with_output(Vec::new());
/// interpreter.run("x = 2\nIf[x == 2]\nLoad[\"a.png\"]").unwrap();
///
/// assert_eq!(interpreter.session.history_names(), ["load"]);
/// ```
pub struct Interpreter {
    /// Everything scripts can observe or change. Hosts read `output`,
    /// `last`, `history` and `input_variables` after evaluation.
    pub session:       Session,
    pub(crate) config: Config,
    pub(crate) vision: Box<dyn Vision>,
    pub(crate) out:    Box<dyn Write>,
    pub(crate) stop:   Option<Stop>,
    /// How many function bodies and imported scripts are being evaluated.
    pub(crate) depth:  usize,
}

impl Interpreter {
    /// Creates an interpreter with the default configuration that writes to
    /// standard output.
    #[must_use]
    pub fn new(vision: Box<dyn Vision>) -> Self {
        let config = Config::default();

        Self { session: Session::new(config.confidence),
               config,
               vision,
               out: Box::new(io::stdout()),
               stop: None,
               depth: 0 }
    }

    /// Replaces the configuration. The session's confidence threshold is
    /// taken from it, and `Reset[]` will restore it.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.session.confidence = config.confidence;
        self.config = config;
        self
    }

    /// Sends `Say` and `Help` output to `out` instead of standard output.
    #[must_use]
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Supplies a value for `Input[key]`.
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.session.inputs.insert(key.into(), value.into());
        self
    }

    /// The configuration this interpreter was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Parses a script with this interpreter's suggestion settings.
    ///
    /// # Errors
    /// Returns the first `ParseError` found.
    pub fn parse(&self, source: &str) -> Result<Program, ParseError> {
        parse_program(source, self.config.max_suggestion_distance)
    }

    /// Evaluates every top-level statement in order.
    ///
    /// Evaluation ends early when an `If` condition is `False` or the script
    /// calls `Exit[]`; neither is an error. Statements that ran before a
    /// failure keep their effect on the session.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised.
    pub fn evaluate(&mut self, program: &Program) -> EvalResult<()> {
        self.stop = None;
        self.depth = 0;
        self.eval_block(&program.statements)?;
        Ok(())
    }

    /// Parses and evaluates a script.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the script does not parse, in which case
    /// nothing is evaluated, or [`Error::Runtime`] if evaluation fails.
    pub fn run(&mut self, source: &str) -> Result<(), Error> {
        let program = self.parse(source)?;
        self.evaluate(&program)?;
        Ok(())
    }

    /// Whether the last evaluated script called `Exit[]`.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.stop == Some(Stop::Exit)
    }

    /// Whether the last evaluated script was cut short by a `False`
    /// condition.
    #[must_use]
    pub fn halted(&self) -> bool {
        self.stop == Some(Stop::Halt)
    }

    /// Evaluates statements in order until one fails or the evaluator is
    /// asked to stop.
    ///
    /// # Returns
    /// The value of the last statement evaluated, or `Value::None` for an
    /// empty sequence.
    pub(crate) fn eval_block(&mut self, statements: &[Node]) -> EvalResult<Value> {
        let mut result = Value::None;

        for statement in statements {
            if self.stop.is_some() {
                break;
            }
            trace!(line = statement.line(), "evaluating statement");
            result = self.eval(statement)?;
        }

        Ok(result)
    }

    /// Evaluates the body of a function or imported script one level deeper.
    ///
    /// # Errors
    /// `RecursionLimit` if entering `name` would exceed
    /// [`Config::max_call_depth`], or any error raised by the statements.
    pub(crate) fn eval_nested(&mut self, name: &str, statements: &[Node], line: usize) -> EvalResult<Value> {
        let limit = self.config.max_call_depth;
        if self.depth >= limit {
            return Err(RuntimeError::RecursionLimit { name: name.to_string(),
                                                      limit,
                                                      line });
        }

        self.depth += 1;
        let result = self.eval_block(statements);
        self.depth -= 1;

        result
    }

    /// Evaluates a single node and returns the resulting value.
    ///
    /// This is the main dispatch of the tree walker. Statements that only
    /// have side effects yield `Value::None`.
    pub(crate) fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Literal { value, .. } => Ok(Value::from(value)),
            Node::ListLit { elements, .. } => {
                let values = elements.iter().map(|e| self.eval(e)).collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::List(values))
            },
            Node::Variable { name, line } => self.eval_variable(name, *line),
            Node::VarDecl { name, value, .. } => {
                let value = self.eval(value)?;
                self.session.variables.insert(name.clone(), value.clone());
                self.session.last = value.clone();
                Ok(value)
            },
            Node::Call { name,
                         arguments,
                         line, } => self.eval_call(name, arguments, *line),
            Node::If { condition,
                       body,
                       line, } => self.eval_if(condition, body, *line),
            Node::ForInDirectory { path,
                                   binding,
                                   body,
                                   line, } => {
                self.eval_for_in_directory(path, binding.as_deref(), body, *line)
            },
            Node::MakeFunction { name, body, line } => Ok(self.eval_make(name, body, *line)),
            Node::RunFunction { name, line } => self.eval_run(name, *line),
            Node::LiteralFunctionRef { name, line } => self.eval_function_ref(name, *line),
            Node::Negate { expr, line } => self.eval_negate(expr, *line),
            Node::Contains { expr, line } => self.eval_contains(expr, *line),
            Node::Input { key, line } => self.eval_input(key, *line),
            Node::Equality { left,
                             right,
                             negated,
                             .. } => self.eval_equality(left, right, *negated),
            Node::Comment { .. } => Ok(Value::None),
        }
    }

    /// Looks up a variable in the session.
    ///
    /// # Errors
    /// `UnknownVariable` if the name was never bound.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.session
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::dry_run::DryRunVision;

    fn interpreter() -> Interpreter {
        Interpreter::new(Box::new(DryRunVision)).with_output(io::sink())
    }

    #[test]
    fn declaration_sets_last() {
        let mut interpreter = interpreter();
        interpreter.run("x = [1, 2.5, \"a\"]").unwrap();

        let expected = Value::List(vec![Value::Integer(1), Value::Real(2.5), Value::from("a")]);
        assert_eq!(interpreter.session.last, expected);
        assert_eq!(interpreter.session.variables["x"], expected);
    }

    #[test]
    fn unknown_variable_is_reported_with_its_line() {
        let mut interpreter = interpreter();
        let error = interpreter.run("x = 1\ny = z").unwrap_err();

        assert!(matches!(error,
                         Error::Runtime(RuntimeError::UnknownVariable { ref name, line: 2 }) if name == "z"));
    }

    #[test]
    fn comments_evaluate_to_nothing() {
        let mut interpreter = interpreter();
        interpreter.run("# nothing here\nx = 1 # trailing").unwrap();

        assert_eq!(interpreter.session.last, Value::Integer(1));
        assert!(interpreter.session.history.is_empty());
    }

    #[test]
    fn configured_confidence_seeds_the_session() {
        let config = Config { confidence: 80.0,
                              ..Config::default() };
        let interpreter = interpreter().with_config(config);

        assert!((interpreter.session.confidence - 80.0).abs() < f64::EPSILON);
    }
}
