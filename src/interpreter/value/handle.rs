use std::{any::Any, fmt, rc::Rc};

/// Backend data attached to a handle.
///
/// The core never looks inside a payload. Backends store whatever they need
/// (decoded pixels, an embedding index, ...) and downcast it back with
/// [`Image::payload`] or [`SearchIndex::payload`]. Clones share the same
/// allocation, which is released when the last session stack entry holding
/// it is dropped.
#[derive(Clone, Default)]
pub struct Payload(Option<Rc<dyn Any>>);

impl Payload {
    /// Wraps backend data.
    #[must_use]
    pub fn new<T: Any>(data: T) -> Self {
        Self(Some(Rc::new(data)))
    }

    /// Returns the payload as `T`, if it holds one.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|data| data.downcast_ref::<T>())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "Payload(..)"),
            None => write!(f, "Payload(empty)"),
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// An image owned by the session's image stack.
///
/// # Example
/// ```
/// use visionscript::interpreter::value::handle::Image;
///
/// let image = Image::new("cat.png", 640, 480).with_payload(vec![0_u8; 4]);
///
/// assert_eq!(image.payload::<Vec<u8>>().map(Vec::len), Some(4));
/// assert_eq!(image.to_string(), "<image cat.png 640x480>");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// The file name or a description of how the image was produced.
    pub name:   String,
    /// Width in pixels.
    pub width:  u32,
    /// Height in pixels.
    pub height: u32,
    payload:    Payload,
}

impl Image {
    /// Creates an image handle with no backend data.
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self { name: name.into(),
               width,
               height,
               payload: Payload::default() }
    }

    /// Attaches backend data to the handle.
    #[must_use]
    pub fn with_payload<T: Any>(mut self, data: T) -> Self {
        self.payload = Payload::new(data);
        self
    }

    /// Returns the backend data as `T`, if present.
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.get()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<image {} {}x{}>", self.name, self.width, self.height)
    }
}

/// A single bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// `[x1, y1, x2, y2]` in pixels.
    pub xyxy:       [f64; 4],
    /// Confidence as a percentage, `0..=100`.
    pub confidence: f64,
    /// Index into [`Detections::class_names`].
    pub class_id:   usize,
}

impl Detection {
    /// Returns `true` if the box lies entirely inside `region`.
    #[must_use]
    pub fn within(&self, region: [f64; 4]) -> bool {
        let [x1, y1, x2, y2] = self.xyxy;
        let [rx1, ry1, rx2, ry2] = region;

        x1 >= rx1 && y1 >= ry1 && x2 <= rx2 && y2 <= ry2
    }

    /// Returns `true` if `(x, y)` falls inside the box.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let [x1, y1, x2, y2] = self.xyxy;
        x >= x1 && x <= x2 && y >= y1 && y <= y2
    }
}

/// The result of a `Detect` or `Segment` call.
///
/// Unlike images, detections are plain data: `Select`, `Count` and
/// `CountInRegion` filter them without calling the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detections {
    /// The boxes, in backend order.
    pub items:       Vec<Detection>,
    /// Class names indexed by [`Detection::class_id`].
    pub class_names: Vec<String>,
}

impl Detections {
    /// Keeps only detections whose confidence is strictly above `threshold`.
    ///
    /// # Example
    /// ```
    /// use visionscript::interpreter::value::handle::{Detection, Detections};
    ///
    /// let detections = Detections { items:       vec![Detection { xyxy:       [0.0; 4],
    ///                                                             confidence: 50.0,
    ///                                                             class_id:   0 },
    ///                                                 Detection { xyxy:       [0.0; 4],
    ///                                                             confidence: 80.0,
    ///                                                             class_id:   0 }],
    ///                               class_names: vec!["cat".to_string()] };
    ///
    /// assert_eq!(detections.above(50.0).len(), 1);
    /// ```
    #[must_use]
    pub fn above(&self, threshold: f64) -> Self {
        self.filtered(|d| d.confidence > threshold)
    }

    /// Keeps only detections of the given class names.
    #[must_use]
    pub fn only_classes(&self, classes: &[String]) -> Self {
        self.filtered(|d| {
                self.class_names
                    .get(d.class_id)
                    .is_some_and(|name| classes.iter().any(|c| c.eq_ignore_ascii_case(name)))
            })
    }

    /// Number of detections labelled `class`.
    #[must_use]
    pub fn count_class(&self, class: &str) -> usize {
        self.items
            .iter()
            .filter(|d| self.class_name(d).is_some_and(|name| name.eq_ignore_ascii_case(class)))
            .count()
    }

    /// Number of detections that lie entirely inside `region`.
    #[must_use]
    pub fn count_within(&self, region: [f64; 4]) -> usize {
        self.items.iter().filter(|d| d.within(region)).count()
    }

    /// Returns the detection at `index` as its own set, keeping the class
    /// names.
    #[must_use]
    pub fn pick(&self, index: usize) -> Option<Self> {
        self.items.get(index).map(|item| Self { items:       vec![*item],
                                                  class_names: self.class_names.clone(), })
    }

    /// The class name of one of this set's detections.
    #[must_use]
    pub fn class_name(&self, detection: &Detection) -> Option<&str> {
        self.class_names.get(detection.class_id).map(String::as_str)
    }

    /// One line per detection: `class confidence [x1, y1, x2, y2]`.
    #[must_use]
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|d| {
                let [x1, y1, x2, y2] = d.xyxy;
                format!("{} {:.2} [{x1}, {y1}, {x2}, {y2}]",
                        self.class_name(d).unwrap_or("object"),
                        d.confidence)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&Detection) -> bool) -> Self {
        Self { items:       self.items.iter().copied().filter(|d| keep(d)).collect(),
               class_names: self.class_names.clone(), }
    }
}

/// A search index built over the image stack by `Search`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchIndex {
    /// Number of images indexed.
    pub len: usize,
    payload: Payload,
}

impl SearchIndex {
    /// Creates an index handle over `len` images.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len,
               payload: Payload::default() }
    }

    /// Attaches backend data to the handle.
    #[must_use]
    pub fn with_payload<T: Any>(mut self, data: T) -> Self {
        self.payload = Payload::new(data);
        self
    }

    /// Returns the backend data as `T`, if present.
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.get()
    }
}
