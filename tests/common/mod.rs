#![allow(dead_code)]

use std::{cell::RefCell, io, path::Path, rc::Rc};

use visionscript::{
    interpreter::{
        evaluator::core::Interpreter,
        value::handle::{Detection, Detections, Image, SearchIndex},
    },
    vision::{Annotation, Transform, Vision, VisionResult},
};

/// Names of the backend calls made so far, in order.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// A backend that records every call and answers with fixed data.
///
/// `detect` finds a confident person and an unsure dog in every image.
#[derive(Default)]
pub struct FakeVision {
    pub calls: CallLog,
}

impl FakeVision {
    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

pub fn people_and_dogs() -> Detections {
    Detections { items:       vec![Detection { xyxy:       [10.0, 10.0, 50.0, 50.0],
                                               confidence: 90.0,
                                               class_id:   0, },
                                   Detection { xyxy:       [60.0, 60.0, 90.0, 70.0],
                                               confidence: 30.0,
                                               class_id:   1, }],
                 class_names: vec!["person".to_string(), "dog".to_string()], }
}

impl Vision for FakeVision {
    fn load(&mut self, path: &Path) -> VisionResult<Image> {
        self.record(format!("load {}", path.display()));
        Ok(Image::new(path.display().to_string(), 100, 80))
    }

    fn save(&mut self, image: &Image, path: &Path) -> VisionResult<()> {
        self.record(format!("save {} {}", image.name, path.display()));
        Ok(())
    }

    fn detect(&mut self, _image: &Image, classes: &[String], model: Option<&str>) -> VisionResult<Detections> {
        self.record(format!("detect {classes:?} {model:?}"));
        Ok(people_and_dogs())
    }

    fn segment(&mut self, _image: &Image, prompt: &str) -> VisionResult<Detections> {
        self.record(format!("segment {prompt}"));
        Ok(people_and_dogs())
    }

    fn classify(&mut self, _image: &Image, labels: &[String]) -> VisionResult<String> {
        self.record("classify");
        Ok(labels.last().cloned().unwrap_or_default())
    }

    fn caption(&mut self, image: &Image) -> VisionResult<String> {
        self.record("caption");
        Ok(format!("a picture of {}", image.name))
    }

    fn read_text(&mut self, _image: &Image) -> VisionResult<Vec<String>> {
        self.record("read_text");
        Ok(vec!["EXIT".to_string(), "Platform 2".to_string()])
    }

    fn read_qr(&mut self, _image: &Image) -> VisionResult<String> {
        self.record("read_qr");
        Ok("https://example.org".to_string())
    }

    fn dominant_colours(&mut self, _image: &Image, k: usize) -> VisionResult<Vec<String>> {
        self.record(format!("colours {k}"));
        Ok(["red", "green", "blue"].iter().take(k).map(ToString::to_string).collect())
    }

    fn transform(&mut self, image: &Image, transform: &Transform) -> VisionResult<Image> {
        self.record(transform.name());
        Ok(Image::new(format!("{}+{}", image.name, transform.name()), image.width, image.height))
    }

    fn show(&mut self, image: &Image, annotation: &Annotation) -> VisionResult<()> {
        let annotation = match annotation {
            Annotation::None => "plain".to_string(),
            Annotation::Boxes(d) => format!("{} boxes", d.len()),
            Annotation::Masks(d) => format!("{} masks", d.len()),
        };
        self.record(format!("show {} {annotation}", image.name));
        Ok(())
    }

    fn show_grid(&mut self, images: &[Image]) -> VisionResult<()> {
        self.record(format!("grid {}", images.len()));
        Ok(())
    }

    fn similarity(&mut self, images: &[Image]) -> VisionResult<f64> {
        self.record(format!("similarity {}", images.len()));
        Ok(0.75)
    }

    fn build_index(&mut self, images: &[Image]) -> VisionResult<SearchIndex> {
        self.record(format!("index {}", images.len()));
        Ok(SearchIndex::new(images.len()))
    }

    fn search(&mut self, index: &SearchIndex, query: &str, k: usize) -> VisionResult<Vec<usize>> {
        self.record(format!("search {query}"));
        Ok((0..index.len).rev().take(k).collect())
    }

    fn train(&mut self, folder: &Path, model: Option<&str>) -> VisionResult<String> {
        self.record(format!("train {}", folder.display()));
        Ok(model.unwrap_or("fastvit").to_string())
    }

    fn label(&mut self, folder: &Path, classes: &[String]) -> VisionResult<()> {
        self.record(format!("label {} {classes:?}", folder.display()));
        Ok(())
    }
}

/// A writer whose contents stay readable after it is handed to an
/// interpreter.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An interpreter over a [`FakeVision`], with its call log and output.
pub fn interpreter() -> (Interpreter, CallLog, SharedBuffer) {
    let vision = FakeVision::default();
    let calls = Rc::clone(&vision.calls);
    let out = SharedBuffer::default();

    (Interpreter::new(Box::new(vision)).with_output(out.clone()), calls, out)
}

/// Calls whose log entry starts with `prefix`.
pub fn calls_to(calls: &CallLog, prefix: &str) -> usize {
    calls.borrow().iter().filter(|call| call.starts_with(prefix)).count()
}
