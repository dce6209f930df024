use std::path::Path;

use tracing::info;

use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{handler_error, string_arg, string_list},
        },
        value::core::Value,
    },
    vocabulary::Builtin,
};

impl Interpreter {
    /// `Use[model]`: chooses the model later `Detect` calls run with.
    pub(crate) fn use_model(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let model = string_arg(args, 0, line)?;

        info!(model, "using model");
        self.session.active_model = Some(model.to_string());
        Ok(Value::None)
    }

    /// `Train[folder, model]`: trains on a labelled folder.
    ///
    /// # Returns
    /// The name of the trained model, which is also kept in the session.
    pub(crate) fn train(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let folder = string_arg(args, 0, line)?;
        let model = args.get(1).map(|m| m.as_str(line)).transpose()?;

        let trained = self.vision
                          .train(Path::new(folder), model)
                          .map_err(handler_error(Builtin::Train, line))?;

        self.session.trained_model = Some(trained.clone());
        Ok(Value::Str(trained))
    }

    /// `Label[folder, classes]`: labels every image in a folder.
    pub(crate) fn label(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let folder = string_arg(args, 0, line)?;
        let classes = string_list(&args[1..], line)?;

        self.vision
            .label(Path::new(folder), &classes)
            .map_err(handler_error(Builtin::Label, line))?;

        Ok(Value::None)
    }
}
