use std::{
    io,
    path::{Path, PathBuf},
};

use crate::interpreter::value::handle::{Detections, Image, SearchIndex};

/// A backend that does nothing but fabricate plausible results.
///
/// Used by the command-line host and by the demo-script tests.
pub mod dry_run;

/// Result type returned by [`Vision`] methods.
pub type VisionResult<T> = Result<T, VisionError>;

/// A failure reported by a vision backend.
///
/// The evaluator wraps it in
/// [`RuntimeError::Handler`](crate::error::RuntimeError::Handler) together with
/// the name of the builtin and the source line.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// The backend does not implement this operation.
    #[error("{0} is not supported by this backend")]
    Unsupported(&'static str),
    /// A file could not be read or written.
    #[error("could not access {}", .path.display())]
    Io {
        /// The file path.
        path:   PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// `Replace` was given a colour the backend does not know.
    #[error("unknown colour '{0}'")]
    UnknownColour(String),
    /// Any other backend failure.
    #[error("{0}")]
    Failed(String),
}

/// A pixel-level edit applied by [`Vision::transform`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Greyscale,
    Edges,
    /// Rotation in degrees, counter-clockwise.
    Rotate(i64),
    Resize {
        width:  u32,
        height: u32,
    },
    /// Blur radius in pixels.
    Blur(u32),
    /// Brightness factor, `1.0` leaves the image unchanged.
    Brightness(f64),
    /// Crop to `[x1, y1, x2, y2]`.
    Crop([f64; 4]),
    /// Fill every region with a named colour.
    Fill {
        regions: Vec<[f64; 4]>,
        colour:  String,
    },
    /// Paste `overlay` with its top-left corner at `(x, y)`.
    Paste {
        overlay: Image,
        x:       i64,
        y:       i64,
    },
}

impl Transform {
    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Greyscale => "greyscale",
            Self::Edges => "edges",
            Self::Rotate(_) => "rotate",
            Self::Resize { .. } => "resize",
            Self::Blur(_) => "blur",
            Self::Brightness(_) => "brightness",
            Self::Crop(_) => "crop",
            Self::Fill { .. } => "fill",
            Self::Paste { .. } => "paste",
        }
    }
}

/// What [`Vision::show`] draws on top of the image.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    None,
    Boxes(Detections),
    Masks(Detections),
}

/// The image and model operations the language delegates.
///
/// Builtins validate their arguments, read the session, call one of these
/// methods and record the result. Every method has a default body that
/// returns [`VisionError::Unsupported`], so a backend only implements what it
/// can do. Confidences in returned [`Detections`] are percentages.
pub trait Vision {
    /// Reads an image from disk.
    fn load(&mut self, _path: &Path) -> VisionResult<Image> {
        Err(VisionError::Unsupported("load"))
    }

    /// Writes an image to disk.
    fn save(&mut self, _image: &Image, _path: &Path) -> VisionResult<()> {
        Err(VisionError::Unsupported("save"))
    }

    /// Finds objects of the given classes, or of every class the model knows
    /// when `classes` is empty. `model` is the one chosen with `Use`.
    fn detect(&mut self,
              _image: &Image,
              _classes: &[String],
              _model: Option<&str>)
              -> VisionResult<Detections> {
        Err(VisionError::Unsupported("detect"))
    }

    /// Segments regions matching a text prompt.
    fn segment(&mut self, _image: &Image, _prompt: &str) -> VisionResult<Detections> {
        Err(VisionError::Unsupported("segment"))
    }

    /// Picks the label that best describes the image.
    fn classify(&mut self, _image: &Image, _labels: &[String]) -> VisionResult<String> {
        Err(VisionError::Unsupported("classify"))
    }

    /// Describes the image in words.
    fn caption(&mut self, _image: &Image) -> VisionResult<String> {
        Err(VisionError::Unsupported("caption"))
    }

    /// Reads text in the image, one entry per detected line.
    fn read_text(&mut self, _image: &Image) -> VisionResult<Vec<String>> {
        Err(VisionError::Unsupported("read text"))
    }

    /// Decodes a QR code.
    fn read_qr(&mut self, _image: &Image) -> VisionResult<String> {
        Err(VisionError::Unsupported("read QR"))
    }

    /// Names the `k` most common colours.
    fn dominant_colours(&mut self, _image: &Image, _k: usize) -> VisionResult<Vec<String>> {
        Err(VisionError::Unsupported("colours"))
    }

    /// Returns a new image with `transform` applied.
    fn transform(&mut self, _image: &Image, transform: &Transform) -> VisionResult<Image> {
        Err(VisionError::Unsupported(transform.name()))
    }

    /// Displays an image.
    fn show(&mut self, _image: &Image, _annotation: &Annotation) -> VisionResult<()> {
        Err(VisionError::Unsupported("show"))
    }

    /// Displays several images side by side.
    fn show_grid(&mut self, _images: &[Image]) -> VisionResult<()> {
        Err(VisionError::Unsupported("show grid"))
    }

    /// Similarity of the given images, `0.0..=1.0`.
    fn similarity(&mut self, _images: &[Image]) -> VisionResult<f64> {
        Err(VisionError::Unsupported("similarity"))
    }

    /// Builds a search index over the images.
    fn build_index(&mut self, _images: &[Image]) -> VisionResult<SearchIndex> {
        Err(VisionError::Unsupported("build index"))
    }

    /// Positions of the (at most `k`) indexed images closest to `query`,
    /// best first.
    fn search(&mut self, _index: &SearchIndex, _query: &str, _k: usize) -> VisionResult<Vec<usize>> {
        Err(VisionError::Unsupported("search"))
    }

    /// Trains a model on a labelled folder and returns the model name.
    fn train(&mut self, _folder: &Path, _model: Option<&str>) -> VisionResult<String> {
        Err(VisionError::Unsupported("train"))
    }

    /// Labels every image in a folder with the given classes.
    fn label(&mut self, _folder: &Path, _classes: &[String]) -> VisionResult<()> {
        Err(VisionError::Unsupported("label"))
    }
}
