use std::path::PathBuf;

use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            control::list_directory,
            core::{EvalResult, Interpreter},
            utils::{dimension_arg, handler_error, real_arg, string_arg, usize_arg},
        },
        value::{core::Value, handle::Image},
    },
    vision::{Annotation, Transform, VisionError},
    vocabulary::Builtin,
};

/// How many random positions `PasteRandom` tries before giving up.
const PASTE_ATTEMPTS: usize = 100;

impl Interpreter {
    /// `Load[path]`: pushes an image, or every entry of a directory, onto the
    /// image stack.
    ///
    /// Inside an `In` loop the active file is loaded whatever the argument
    /// says. An image value (as supplied through `Input`) is pushed as is.
    ///
    /// # Returns
    /// The last image pushed.
    pub(crate) fn load(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let path = if let Some(frame) = &self.session.context_frame {
            frame.active_file().to_path_buf()
        } else {
            match args.first() {
                Some(Value::Image(image)) => return Ok(self.push_image(image.clone())),
                Some(value) => PathBuf::from(value.as_str(line)?),
                None => {
                    return Err(RuntimeError::TypeError { details: "Load needs a path outside of an In loop".to_string(),
                                                         line });
                },
            }
        };

        let paths = if path.is_dir() { list_directory(&path, line)? } else { vec![path] };

        let mut loaded = Value::None;
        for path in paths {
            let image = self.vision.load(&path).map_err(handler_error(Builtin::Load, line))?;
            self.session.last_loaded_image_name = Some(path.display().to_string());
            loaded = self.push_image(image);
        }

        Ok(loaded)
    }

    /// `Save[path]`: writes the top image to disk.
    pub(crate) fn save(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let path = PathBuf::from(string_arg(args, 0, line)?);
        let image = self.session.top_image(line)?;

        self.vision.save(image, &path).map_err(handler_error(Builtin::Save, line))?;
        Ok(Value::None)
    }

    /// `Size[]`: `[width, height]` of the top image.
    pub(crate) fn size(&self, line: usize) -> EvalResult<Value> {
        let image = self.session.top_image(line)?;

        Ok(Value::List(vec![i64::from(image.width).into(), i64::from(image.height).into()]))
    }

    /// `Cutout[]`: crops the first detection in `last` out of the top image.
    pub(crate) fn cutout(&mut self, line: usize) -> EvalResult<Value> {
        let first = self.session
                        .last_detections(line)?
                        .items
                        .first()
                        .copied()
                        .ok_or(RuntimeError::NoDetections { line })?;

        self.push_transformed(Builtin::Cutout, &Transform::Crop(first.xyxy), line)
    }

    /// `Replace[colour]`: fills every confident detection in `last` with a
    /// colour.
    pub(crate) fn replace(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let colour = string_arg(args, 0, line)?.to_string();
        let regions = self.session
                          .last_detections(line)?
                          .above(self.session.confidence)
                          .items
                          .iter()
                          .map(|d| d.xyxy)
                          .collect();

        self.push_transformed(Builtin::Replace, &Transform::Fill { regions, colour }, line)
    }

    pub(crate) fn greyscale(&mut self, line: usize) -> EvalResult<Value> {
        self.push_transformed(Builtin::Greyscale, &Transform::Greyscale, line)
    }

    pub(crate) fn get_edges(&mut self, line: usize) -> EvalResult<Value> {
        self.push_transformed(Builtin::GetEdges, &Transform::Edges, line)
    }

    pub(crate) fn rotate(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let degrees = args[0].as_integer(line)?;
        self.push_transformed(Builtin::Rotate, &Transform::Rotate(degrees), line)
    }

    pub(crate) fn blur(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let radius = dimension_arg(args, 0, line)?;
        self.push_transformed(Builtin::Blur, &Transform::Blur(radius), line)
    }

    pub(crate) fn set_brightness(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let factor = real_arg(args, 0, line)?;
        self.push_transformed(Builtin::SetBrightness, &Transform::Brightness(factor), line)
    }

    pub(crate) fn resize(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let width = dimension_arg(args, 0, line)?;
        let height = dimension_arg(args, 1, line)?;
        self.push_transformed(Builtin::Resize, &Transform::Resize { width, height }, line)
    }

    /// `Paste[x, y]`: pastes the top image onto the one below it.
    pub(crate) fn paste(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let x = args[0].as_integer(line)?;
        let y = args[1].as_integer(line)?;

        let (base, overlay) = base_and_overlay(&self.session.image_stack, line)?;
        let transform = Transform::Paste { overlay: overlay.clone(),
                                           x,
                                           y };
        let pasted = self.vision
                         .transform(base, &transform)
                         .map_err(handler_error(Builtin::Paste, line))?;

        Ok(self.push_image(pasted))
    }

    /// `PasteRandom[]`: pastes the top image onto the one below it, at a
    /// random position that is not inside any detection in `last`.
    ///
    /// # Errors
    /// A handler error if no free position turns up after a bounded number
    /// of attempts.
    pub(crate) fn paste_random(&mut self, line: usize) -> EvalResult<Value> {
        let boxes = match &self.session.last {
            Value::Detections(detections) => detections.items.clone(),
            _ => Vec::new(),
        };
        let (base, overlay) = base_and_overlay(&self.session.image_stack, line)?;

        let max_x = base.width.saturating_sub(overlay.width);
        let max_y = base.height.saturating_sub(overlay.height);
        let mut rng = rand::thread_rng();

        let spot = (0..PASTE_ATTEMPTS).map(|_| (rng.gen_range(0..=max_x), rng.gen_range(0..=max_y)))
                                      .find(|&(x, y)| {
                                          !boxes.iter()
                                                .any(|b| b.contains_point(f64::from(x), f64::from(y)))
                                      });
        let Some((x, y)) = spot else {
            return Err(RuntimeError::Handler { name:   Builtin::PasteRandom.display_name(),
                                               line,
                                               source: VisionError::Failed("no free position to paste onto".to_string()), });
        };

        let transform = Transform::Paste { overlay: overlay.clone(),
                                           x:       i64::from(x),
                                           y:       i64::from(y), };
        let pasted = self.vision
                         .transform(base, &transform)
                         .map_err(handler_error(Builtin::PasteRandom, line))?;

        Ok(self.push_image(pasted))
    }

    /// `GetColours[k]`: names of the `k` (default 1) most common colours.
    pub(crate) fn get_colours(&mut self, args: &[Value], line: usize) -> EvalResult<Value> {
        let k = if args.is_empty() { 1 } else { usize_arg(args, 0, line)? };
        let image = self.session.top_image(line)?;

        let colours = self.vision
                          .dominant_colours(image, k)
                          .map_err(handler_error(Builtin::GetColours, line))?;

        Ok(Value::List(colours.into_iter().map(Value::Str).collect()))
    }

    /// `GetText[]`: lines of text found in the top image.
    pub(crate) fn get_text(&mut self, line: usize) -> EvalResult<Value> {
        let image = self.session.top_image(line)?;
        let text = self.vision.read_text(image).map_err(handler_error(Builtin::GetText, line))?;

        Ok(Value::List(text.into_iter().map(Value::Str).collect()))
    }

    pub(crate) fn read_qr(&mut self, line: usize) -> EvalResult<Value> {
        let image = self.session.top_image(line)?;
        let text = self.vision.read_qr(image).map_err(handler_error(Builtin::ReadQR, line))?;

        Ok(Value::Str(text))
    }

    /// `Show[]`: displays the top image.
    ///
    /// Right after a `Search`, the results are shown side by side instead.
    /// Otherwise the image is annotated with the confident part of the most
    /// recent detections, as boxes after `Detect` and as masks after
    /// `Segment`.
    pub(crate) fn show(&mut self, line: usize) -> EvalResult<Value> {
        if self.session.history.last() == Some(&Builtin::Search)
           && let Value::List(items) = &self.session.last
        {
            let images = items.iter()
                              .filter_map(|item| match item {
                                  Value::Image(image) => Some(image.clone()),
                                  _ => None,
                              })
                              .collect::<Vec<_>>();
            self.vision.show_grid(&images).map_err(handler_error(Builtin::Show, line))?;
            return Ok(Value::None);
        }

        let confidence = self.session.confidence;
        let latest = self.session.detections_stack.last();
        let annotation = match (self.session.latest_of(&[Builtin::Detect, Builtin::Segment]), latest) {
            (Some(Builtin::Segment), Some(detections)) => Annotation::Masks(detections.above(confidence)),
            (Some(_), Some(detections)) => Annotation::Boxes(detections.above(confidence)),
            _ => Annotation::None,
        };

        let image = self.session.top_image(line)?;
        self.vision.show(image, &annotation).map_err(handler_error(Builtin::Show, line))?;

        Ok(Value::None)
    }

    /// `Compare[]`: displays every loaded image side by side.
    pub(crate) fn compare(&mut self, line: usize) -> EvalResult<Value> {
        if self.session.image_stack.is_empty() {
            return Err(RuntimeError::EmptyStack { stack: "image", line });
        }

        self.vision
            .show_grid(&self.session.image_stack)
            .map_err(handler_error(Builtin::Compare, line))?;

        Ok(Value::None)
    }

    /// Applies a transform to the top image and pushes the result.
    fn push_transformed(&mut self, builtin: Builtin, transform: &Transform, line: usize) -> EvalResult<Value> {
        let image = self.session.top_image(line)?;
        let transformed = self.vision
                              .transform(image, transform)
                              .map_err(handler_error(builtin, line))?;

        Ok(self.push_image(transformed))
    }

    fn push_image(&mut self, image: Image) -> Value {
        self.session.image_stack.push(image.clone());
        Value::Image(image)
    }
}

/// The two topmost images: the one to paste onto, and the one to paste.
fn base_and_overlay(images: &[Image], line: usize) -> EvalResult<(&Image, &Image)> {
    match images {
        [.., base, overlay] => Ok((base, overlay)),
        _ => Err(RuntimeError::NotEnoughImages { needed: 2,
                                                 found: images.len(),
                                                 line }),
    }
}
