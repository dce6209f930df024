use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{handler_error, real_arg, string_arg, string_list, usize_arg},
        },
        value::{core::Value, handle::Image},
    },
    util::num::usize_to_i64_checked,
    vocabulary::Builtin,
};

impl Interpreter {
    /// `Detect[class, ...]`: finds objects in the top image.
    ///
    /// The detections are pushed onto the detections stack unfiltered;
    /// operations that act on them apply the confidence threshold
    /// themselves. `classes` becomes the requested class names, or every
    /// class the backend reported when none were requested.
    pub(crate) fn detect(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let classes = string_list(args, line)?;
        let image = self.session.top_image(line)?;

        let mut detections = self.vision
                                 .detect(image, &classes, self.session.active_model.as_deref())
                                 .map_err(handler_error(Builtin::Detect, line))?;
        if !classes.is_empty() {
            detections = detections.only_classes(&classes);
        }

        self.session.classes = if classes.is_empty() { detections.class_names.clone() } else { classes };
        self.session.detections_stack.push(detections.clone());

        Ok(Value::Detections(detections))
    }

    /// `Segment[prompt]`: segments regions matching a prompt and pushes the
    /// confident ones.
    pub(crate) fn segment(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let prompt = string_arg(args, 0, line)?;
        let image = self.session.top_image(line)?;

        let detections = self.vision
                             .segment(image, prompt)
                             .map_err(handler_error(Builtin::Segment, line))?
                             .above(self.session.confidence);
        self.session.detections_stack.push(detections.clone());

        Ok(Value::Detections(detections))
    }

    /// `Classify[label, ...]`: picks the label that fits the top image best.
    pub(crate) fn classify(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let labels = string_list(args, line)?;
        let image = self.session.top_image(line)?;

        let label = self.vision
                        .classify(image, &labels)
                        .map_err(handler_error(Builtin::Classify, line))?;

        Ok(Value::Str(label))
    }

    pub(crate) fn caption(&mut self, line: usize) -> EvalResult<Value> {
        let image = self.session.top_image(line)?;
        let caption = self.vision.caption(image).map_err(handler_error(Builtin::Caption, line))?;

        Ok(Value::Str(caption))
    }

    /// `Count[class]`: how many detections `last` holds, optionally only
    /// of one class.
    pub(crate) fn count(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        let detections = self.session.last_detections(line)?;

        let count = match args.first() {
            Some(class) => detections.count_class(class.as_str(line)?),
            None => detections.len(),
        };

        Ok(Value::Integer(usize_to_i64_checked(count, line)?))
    }

    /// `CountInRegion[x1, y1, x2, y2]`: how many confident detections in
    /// `last` lie entirely inside the region.
    pub(crate) fn count_in_region(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        let region = [real_arg(args, 0, line)?,
                      real_arg(args, 1, line)?,
                      real_arg(args, 2, line)?,
                      real_arg(args, 3, line)?];

        let count = self.session
                        .last_detections(line)?
                        .above(self.session.confidence)
                        .count_within(region);

        Ok(Value::Integer(usize_to_i64_checked(count, line)?))
    }

    /// `Select[index]`: narrows the detections in `last` to the confident
    /// ones, then to the one at `index` if given.
    ///
    /// Only applies right after `Detect`, `Segment` or `Classify`; anywhere
    /// else it yields `None` and `last` is left alone. After `Classify` the
    /// label is passed through.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index` is past the confident detections.
    pub(crate) fn select(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        if !matches!(self.session.last_function_type,
                     Some(Builtin::Detect | Builtin::Segment | Builtin::Classify))
        {
            return Ok(Value::None);
        }

        let Value::Detections(detections) = &self.session.last else {
            return Ok(self.session.last.clone());
        };
        let confident = detections.above(self.session.confidence);

        let Some(index) = args.first().map(|_| usize_arg(args, 0, line)).transpose()? else {
            return Ok(Value::Detections(confident));
        };
        confident.pick(index)
                 .map(Value::Detections)
                 .ok_or(RuntimeError::IndexOutOfBounds { len: confident.len(),
                                                         found: index,
                                                         line })
    }

    /// `Read[]`: renders detections as text right after `Detect` or
    /// `Segment`; otherwise yields `last` unchanged.
    pub(crate) fn read(&self) -> Value {
        match (&self.session.last_function_type, &self.session.last) {
            (Some(Builtin::Detect | Builtin::Segment), Value::Detections(detections)) => {
                Value::Str(detections.above(self.session.confidence).render())
            },
            (_, last) => last.clone(),
        }
    }

    /// `Get[index]`: one element of the list or detections in `last`.
    pub(crate) fn get(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        let index = usize_arg(args, 0, line)?;
        let out_of_bounds = |len| RuntimeError::IndexOutOfBounds { len,
                                                                   found: index,
                                                                   line };

        match &self.session.last {
            Value::List(items) => items.get(index).cloned().ok_or_else(|| out_of_bounds(items.len())),
            Value::Detections(detections) => {
                detections.pick(index)
                          .map(Value::Detections)
                          .ok_or_else(|| out_of_bounds(detections.len()))
            },
            other => Err(RuntimeError::TypeError { details: format!("Cannot take an item of {}",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// `Search[query]`: the loaded images closest to a text query, best
    /// first.
    ///
    /// The first search of a session indexes the image stack and pushes
    /// the index; later searches reuse the most recent index.
    pub(crate) fn search(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let query = string_arg(args, 0, line)?;

        if self.session.search_index_stack.is_empty() {
            let index = self.vision
                            .build_index(&self.session.image_stack)
                            .map_err(handler_error(Builtin::Search, line))?;
            self.session.search_index_stack.push(index);
        }
        let Some(index) = self.session.search_index_stack.last() else {
            return Err(RuntimeError::EmptyStack { stack: "search index",
                                                  line });
        };

        let positions = self.vision
                            .search(index, query, self.config.search_results)
                            .map_err(handler_error(Builtin::Search, line))?;

        let images = positions.into_iter()
                              .map(|position| {
                                  self.session
                                      .image_stack
                                      .get(position)
                                      .cloned()
                                      .map(Value::Image)
                                      .ok_or(RuntimeError::IndexOutOfBounds { len: self.session
                                                                                       .image_stack
                                                                                       .len(),
                                                                              found: position,
                                                                              line })
                              })
                              .collect::<EvalResult<Vec<_>>>()?;

        Ok(Value::List(images))
    }

    /// `Similarity[n]`: how alike the last `n` (default 2) images are.
    ///
    /// # Errors
    /// `NotEnoughImages` if fewer than `n`, or fewer than two, images are
    /// loaded.
    pub(crate) fn similarity(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let n = if args.is_empty() { 2 } else { usize_arg(args, 0, line)? };
        let needed = n.max(2);
        let found = self.session.image_stack.len();

        if found < needed {
            return Err(RuntimeError::NotEnoughImages { needed, found, line });
        }

        let images: &[Image] = &self.session.image_stack[found - needed..];
        let score = self.vision
                        .similarity(images)
                        .map_err(handler_error(Builtin::Similarity, line))?;

        Ok(Value::Real(score))
    }
}
