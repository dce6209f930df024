use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Stop},
        value::core::Value,
    },
    session::ContextFrame,
};

impl Interpreter {
    /// Evaluates an `If` statement.
    ///
    /// The condition decides how the rest of the program proceeds:
    /// - `True` evaluates the body, then continues with the next statement;
    /// - `None` skips the body and continues;
    /// - `False` stops the entire remaining program, including any loop or
    ///   function the `If` is nested in.
    ///
    /// Calls made while evaluating the condition are recorded in the history
    /// as usual, but `last` is restored to its value from before the
    /// condition.
    ///
    /// # Errors
    /// `ExpectedBoolean` if the condition is neither a boolean nor `None`.
    pub(crate) fn eval_if(&mut self, condition: &Node, body: &[Node], line: usize) -> EvalResult<Value> {
        let saved = self.session.last.clone();
        let condition = self.eval(condition)?;
        self.session.last = saved;

        match condition {
            Value::Bool(true) => self.eval_block(body),
            Value::Bool(false) => {
                debug!(line, "condition is false, halting");
                self.stop = Some(Stop::Halt);
                Ok(Value::None)
            },
            Value::None => Ok(Value::None),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Evaluates an `In` statement.
    ///
    /// The directory is listed once, in whatever order the file system
    /// returns. For every entry the session's context frame is set to that
    /// entry and the entries still to come, the optional binding is set to
    /// the entry's path, and the body is evaluated. Afterwards the frame that
    /// was active before the statement is restored, whether or not the body
    /// failed.
    ///
    /// # Returns
    /// The value of the last statement of the last iteration.
    ///
    /// # Errors
    /// - `ExpectedString` if the path is not a string.
    /// - `Directory` if the directory cannot be listed.
    /// - Any error raised by the body.
    pub(crate) fn eval_for_in_directory(&mut self,
                                        path: &Node,
                                        binding: Option<&str>,
                                        body: &[Node],
                                        line: usize)
                                        -> EvalResult<Value> {
        let directory = PathBuf::from(self.eval(path)?.as_str(line)?);
        let entries = list_directory(&directory, line)?;

        debug!(directory = %directory.display(), entries = entries.len(), "iterating directory");

        let previous = self.session.context_frame.take();
        let result = self.visit_entries(entries.into(), binding, body);
        self.session.context_frame = previous;

        result
    }

    fn visit_entries(&mut self,
                     entries: Rc<[PathBuf]>,
                     binding: Option<&str>,
                     body: &[Node])
                     -> EvalResult<Value> {
        let mut result = Value::None;

        for (index, entry) in entries.iter().enumerate() {
            if self.stop.is_some() {
                break;
            }

            if let Some(name) = binding {
                self.session
                    .variables
                    .insert(name.to_string(), Value::Str(entry.display().to_string()));
            }
            self.session.context_frame = Some(ContextFrame::new(Rc::clone(&entries), index));

            result = self.eval_block(body)?;
        }

        Ok(result)
    }
}

/// Lists the paths of a directory's entries in file-system order.
///
/// # Errors
/// `Directory` if the directory or one of its entries cannot be read.
pub(crate) fn list_directory(directory: &Path, line: usize) -> EvalResult<Vec<PathBuf>> {
    let to_error = |source| RuntimeError::Directory { path: directory.to_path_buf(),
                                                      line,
                                                      source };

    fs::read_dir(directory).map_err(to_error)?
                           .map(|entry| entry.map(|e| e.path()).map_err(to_error))
                           .collect()
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io};

    use super::*;
    use crate::{error::Error, vision::dry_run::DryRunVision};

    fn interpreter() -> Interpreter {
        Interpreter::new(Box::new(DryRunVision)).with_output(io::sink())
    }

    #[test]
    fn false_condition_halts_the_rest_of_the_program() {
        let mut interpreter = interpreter();
        interpreter.run("Load[\"a.png\"]\nIf[False]\nLoad[\"b.png\"]").unwrap();

        assert!(interpreter.halted());
        assert_eq!(interpreter.session.image_stack.len(), 1);
    }

    #[test]
    fn none_condition_skips_only_the_body() {
        let mut interpreter = interpreter();
        interpreter.run("Load[\"a.png\"]\nIf[Save[\"x.png\"]: Load[\"b.png\"]]\nLoad[\"c.png\"]")
                   .unwrap();

        assert!(!interpreter.halted());
        assert_eq!(interpreter.session.image_stack.len(), 2);
        assert_eq!(interpreter.session.history_names(), ["load", "save", "load"]);
    }

    #[test]
    fn condition_does_not_replace_last() {
        let mut interpreter = interpreter();
        interpreter.run("x = 1\nIf[Not[False]]").unwrap();

        assert_eq!(interpreter.session.last, Value::Integer(1));
    }

    #[test]
    fn non_boolean_condition_is_an_error() {
        let mut interpreter = interpreter();

        assert!(matches!(interpreter.run("If[\"yes\"]"),
                         Err(Error::Runtime(RuntimeError::ExpectedBoolean { line: 1 }))));
    }

    #[test]
    fn loop_binds_each_entry_and_clears_the_frame() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let mut interpreter = interpreter();
        let source = format!("In[\"{}\", file]\n  Load[file]\n", dir.path().display());
        interpreter.run(&source).unwrap();

        assert_eq!(interpreter.session.image_stack.len(), 2);
        assert_eq!(interpreter.session.context_frame, None);
        assert!(interpreter.session.variables.contains_key("file"));
    }

    #[test]
    fn frame_tracks_the_entries_left_to_visit() {
        let entries: Rc<[PathBuf]> = ["a.png", "b.png", "c.png"].map(PathBuf::from).into();
        let mut interpreter = interpreter();
        let body = interpreter.parse("Load[]\nIf[file == \"a.png\"]").unwrap().statements;

        interpreter.visit_entries(Rc::clone(&entries), Some("file"), &body).unwrap();

        let frame = interpreter.session.context_frame.clone().unwrap();
        assert_eq!(frame.active_file(), Path::new("b.png"));
        assert_eq!(frame.remaining(), &entries[2..]);
        assert_eq!(interpreter.session.image_stack.len(), 2);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let mut interpreter = interpreter();
        let result = interpreter.run(&format!("In[\"{}\"]\n  Load[]\n", missing.display()));

        assert!(matches!(result, Err(Error::Runtime(RuntimeError::Directory { line: 1, .. }))));
    }
}
