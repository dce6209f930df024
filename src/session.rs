use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    ast::Node,
    config::DEFAULT_CONFIDENCE,
    error::RuntimeError,
    interpreter::value::{
        core::Value,
        handle::{Detections, Image, SearchIndex},
    },
    vocabulary::Builtin,
};

/// The file an `In` loop is currently visiting.
///
/// Every iteration of one loop shares the same listing; only the cursor moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFrame {
    entries: Rc<[PathBuf]>,
    index:   usize,
}

impl ContextFrame {
    pub(crate) fn new(entries: Rc<[PathBuf]>, index: usize) -> Self {
        debug_assert!(index < entries.len());
        Self { entries, index }
    }

    /// The entry the loop body is running for. `Load` reads this file
    /// instead of its argument.
    #[must_use]
    pub fn active_file(&self) -> &Path {
        &self.entries[self.index]
    }

    /// Entries not yet visited, in listing order.
    #[must_use]
    pub fn remaining(&self) -> &[PathBuf] {
        &self.entries[self.index + 1..]
    }
}

/// The kind of value a script asked the host for with `Input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
}

/// Everything a script can observe or change.
///
/// One `Session` lives as long as its interpreter and is shared by every
/// script evaluated on it, including imported ones. Stacks only grow, except
/// through [`Session::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub image_stack:            Vec<Image>,
    pub detections_stack:       Vec<Detections>,
    pub search_index_stack:     Vec<SearchIndex>,
    /// Result of the most recent value-producing statement.
    pub last:                   Value,
    /// Builtin of the most recent successful call.
    pub last_function_type:     Option<Builtin>,
    /// Evaluated arguments of the most recent successful call.
    pub last_function_args:     Vec<Value>,
    pub last_loaded_image_name: Option<String>,
    /// Every successful call, in order.
    pub history:                Vec<Builtin>,
    /// Bodies of `Make` functions, by name.
    pub functions:              HashMap<String, Vec<Node>>,
    pub variables:              HashMap<String, Value>,
    /// Keys the script read with `Input`.
    pub input_variables:        BTreeMap<String, InputKind>,
    /// Values supplied by the host for `Input`.
    pub inputs:                 HashMap<String, Value>,
    /// Detection threshold in percent; a detection is kept when its
    /// confidence is strictly greater.
    pub confidence:             f64,
    /// Classes named by the most recent `Detect`.
    pub classes:                Vec<String>,
    /// What the host should present as the script's result.
    pub output:                 Value,
    pub context_frame:          Option<ContextFrame>,
    /// Model chosen with `Use`.
    pub active_model:           Option<String>,
    /// Model produced by the most recent `Train`.
    pub trained_model:          Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE)
    }
}

impl Session {
    /// Creates an empty session with the given confidence threshold.
    #[must_use]
    pub fn new(confidence: f64) -> Self {
        Self { image_stack: Vec::new(),
               detections_stack: Vec::new(),
               search_index_stack: Vec::new(),
               last: Value::None,
               last_function_type: None,
               last_function_args: Vec::new(),
               last_loaded_image_name: None,
               history: Vec::new(),
               functions: HashMap::new(),
               variables: HashMap::new(),
               input_variables: BTreeMap::new(),
               inputs: HashMap::new(),
               confidence,
               classes: Vec::new(),
               output: Value::None,
               context_frame: None,
               active_model: None,
               trained_model: None }
    }

    /// Returns every field to its initial value.
    ///
    /// Dropping the stacks releases every image and index the session owned.
    ///
    /// # Example
    /// ```
    /// use visionscript::session::Session;
    ///
    /// let mut session = Session::default();
    /// session.variables.insert("x".to_string(), 1_i64.into());
    /// session.reset(50.0);
    ///
    /// assert_eq!(session, Session::default());
    /// ```
    pub fn reset(&mut self, confidence: f64) {
        *self = Self::new(confidence);
    }

    /// Canonical names of every call in [`Session::history`].
    #[must_use]
    pub fn history_names(&self) -> Vec<&'static str> {
        self.history.iter().map(|builtin| builtin.canonical_name()).collect()
    }

    /// The most recently pushed image.
    ///
    /// # Errors
    /// `EmptyStack` if no image has been loaded.
    pub fn top_image(&self, line: usize) -> Result<&Image, RuntimeError> {
        self.image_stack.last().ok_or(RuntimeError::EmptyStack { stack: "image", line })
    }

    /// The detections in `last`.
    ///
    /// # Errors
    /// `NoDetections` if the last value is not a set of detections.
    pub fn last_detections(&self, line: usize) -> Result<&Detections, RuntimeError> {
        match &self.last {
            Value::Detections(detections) => Ok(detections),
            _ => Err(RuntimeError::NoDetections { line }),
        }
    }

    /// The most recent builtin in the history that is one of `builtins`.
    #[must_use]
    pub fn latest_of(&self, builtins: &[Builtin]) -> Option<Builtin> {
        self.history.iter().rev().copied().find(|b| builtins.contains(b))
    }
}
