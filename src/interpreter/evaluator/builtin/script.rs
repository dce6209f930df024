use std::{fs, io::Write, path::PathBuf};

use tracing::info;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Stop},
            utils::{real_arg, string_arg},
        },
        parser::core::parse_program,
        value::core::Value,
    },
    suggest::suggest,
    vocabulary::{self, Word},
};

impl Interpreter {
    /// `Say[value]`: writes a value, or `last` when no value is given, to
    /// the output sink and records the text as the session output.
    ///
    /// Lists are written one element per line, detections one box per line.
    /// Saying `None` writes nothing and leaves the output untouched.
    pub(crate) fn say(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let value = args.first().unwrap_or(&self.session.last);
        let text = match value {
            Value::None => return Ok(Value::None),
            Value::List(items) => items.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"),
            other => other.to_string(),
        };

        writeln!(self.out, "{text}").map_err(|source| RuntimeError::Output { line, source })?;
        self.session.output = Value::Str(text);

        Ok(Value::None)
    }

    /// `Help[name]`: writes the usage line of an operation or keyword.
    ///
    /// # Errors
    /// `UnknownFunction` with suggestions if the name is not in the
    /// vocabulary.
    pub(crate) fn help(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let name = string_arg(args, 0, line)?;

        let usage = match vocabulary::lookup(name) {
            Some(Word::Builtin(builtin)) => builtin.usage(),
            Some(Word::Keyword(keyword)) => keyword.usage(),
            None => {
                return Err(RuntimeError::UnknownFunction { name:        name.to_string(),
                                                           line,
                                                           suggestions: suggest(name,
                                                                                self.config
                                                                                    .max_suggestion_distance), });
            },
        };

        writeln!(self.out, "{usage}").map_err(|source| RuntimeError::Output { line, source })?;
        Ok(Value::Str(usage.to_string()))
    }

    /// `Import[name]`: evaluates `name.vic` in the current session.
    ///
    /// Only ASCII letters, digits and `-` are kept from the name, so an
    /// import can never reach outside the working directory. Functions and
    /// variables the imported script defines stay visible afterwards. A
    /// `False` condition in the imported script ends that script only;
    /// `Exit[]` ends the importing one as well.
    ///
    /// # Errors
    /// - `ImportRead` if the file cannot be read.
    /// - `Import` if it does not parse.
    /// - `RecursionLimit` if imports nest too deeply, as when a script
    ///   imports itself.
    /// - Any runtime error raised while evaluating it.
    pub(crate) fn import(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let module = string_arg(args, 0, line)?.chars()
                                               .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                                               .collect::<String>();
        let path = PathBuf::from(format!("{module}.{}", self.config.import_extension));

        let source = fs::read_to_string(&path).map_err(|source| RuntimeError::ImportRead { path: path.clone(),
                                                                                           line,
                                                                                           source })?;
        let program = parse_program(&source, self.config.max_suggestion_distance).map_err(|source| {
                          RuntimeError::Import { path: path.clone(),
                                                 line,
                                                 source }
                      })?;

        info!(path = %path.display(), statements = program.statements.len(), "importing script");
        self.eval_nested(&path.display().to_string(), &program.statements, line)?;

        if self.stop == Some(Stop::Halt) {
            self.stop = None;
        }
        Ok(Value::None)
    }

    /// `Reset[]`: returns the session to its initial state. Images and
    /// indices held by the stacks are released.
    pub(crate) fn reset(&mut self) -> Value {
        info!("resetting session");
        self.session.reset(self.config.confidence);
        Value::None
    }

    /// `Exit[]`: stops evaluation after the current statement. The host
    /// decides what to do next through
    /// [`Interpreter::exit_requested`].
    pub(crate) fn exit(&mut self) -> Value {
        self.stop = Some(Stop::Exit);
        Value::None
    }

    /// `SetConfidence[percent]`: sets the detection threshold.
    ///
    /// # Errors
    /// `TypeError` if the threshold is outside `0..=100`.
    pub(crate) fn set_confidence(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let confidence = real_arg(args, 0, line)?;

        if !(0.0..=100.0).contains(&confidence) {
            return Err(RuntimeError::TypeError { details: format!("Confidence must be between 0 and 100, found {confidence}"),
                                                 line });
        }

        self.session.confidence = confidence;
        Ok(Value::None)
    }
}
