use std::path::Path;

use tracing::warn;

use crate::{
    interpreter::value::handle::{Detections, Image, SearchIndex},
    vision::{Annotation, Transform, Vision, VisionResult},
};

/// Width given to every fabricated image.
const WIDTH: u32 = 640;
/// Height given to every fabricated image.
const HEIGHT: u32 = 480;

/// A [`Vision`] backend that never touches pixels.
///
/// Images are handles named after their path, detections are always empty
/// and classification picks the first label. This lets a script be checked
/// end to end (parsing, dispatch, session bookkeeping) without any model.
///
/// # Example
/// ```
/// use visionscript::{run_script, vision::dry_run::DryRunVision};
///
/// let session = run_script("Load[\"cat.png\"]\nDetect[\"cat\"]", Box::new(DryRunVision)).unwrap();
///
/// assert_eq!(session.image_stack.len(), 1);
/// assert_eq!(session.history_names(), ["load", "detect"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunVision;

impl Vision for DryRunVision {
    fn load(&mut self, path: &Path) -> VisionResult<Image> {
        warn!(path = %path.display(), "dry run: fabricating image");
        Ok(Image::new(path.display().to_string(), WIDTH, HEIGHT))
    }

    fn save(&mut self, image: &Image, path: &Path) -> VisionResult<()> {
        warn!(image = %image.name, path = %path.display(), "dry run: not saving");
        Ok(())
    }

    fn detect(&mut self,
              image: &Image,
              classes: &[String],
              model: Option<&str>)
              -> VisionResult<Detections> {
        warn!(image = %image.name, ?classes, ?model, "dry run: no detections");
        Ok(Detections { items:       Vec::new(),
                        class_names: classes.to_vec(), })
    }

    fn segment(&mut self, image: &Image, prompt: &str) -> VisionResult<Detections> {
        warn!(image = %image.name, prompt, "dry run: no segments");
        Ok(Detections { items:       Vec::new(),
                        class_names: vec![prompt.to_string()], })
    }

    fn classify(&mut self, image: &Image, labels: &[String]) -> VisionResult<String> {
        warn!(image = %image.name, "dry run: picking the first label");
        Ok(labels.first().cloned().unwrap_or_default())
    }

    fn caption(&mut self, image: &Image) -> VisionResult<String> {
        warn!(image = %image.name, "dry run: fabricating caption");
        Ok("an image".to_string())
    }

    fn read_text(&mut self, image: &Image) -> VisionResult<Vec<String>> {
        warn!(image = %image.name, "dry run: no text");
        Ok(Vec::new())
    }

    fn read_qr(&mut self, image: &Image) -> VisionResult<String> {
        warn!(image = %image.name, "dry run: no QR code");
        Ok(String::new())
    }

    fn dominant_colours(&mut self, image: &Image, k: usize) -> VisionResult<Vec<String>> {
        warn!(image = %image.name, k, "dry run: fabricating colours");
        Ok(vec!["black".to_string(); k])
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn transform(&mut self, image: &Image, transform: &Transform) -> VisionResult<Image> {
        warn!(image = %image.name, transform = transform.name(), "dry run: adjusting size only");

        let (width, height) = match transform {
            Transform::Rotate(degrees) if degrees.rem_euclid(180) == 90 => {
                (image.height, image.width)
            },
            Transform::Resize { width, height } => (*width, *height),
            Transform::Crop([x1, y1, x2, y2]) => {
                ((x2 - x1).abs().round() as u32, (y2 - y1).abs().round() as u32)
            },
            _ => (image.width, image.height),
        };

        Ok(Image::new(format!("{} ({})", image.name, transform.name()), width, height))
    }

    fn show(&mut self, image: &Image, _annotation: &Annotation) -> VisionResult<()> {
        warn!(image = %image.name, "dry run: not showing");
        Ok(())
    }

    fn show_grid(&mut self, images: &[Image]) -> VisionResult<()> {
        warn!(count = images.len(), "dry run: not showing grid");
        Ok(())
    }

    fn similarity(&mut self, images: &[Image]) -> VisionResult<f64> {
        warn!(count = images.len(), "dry run: reporting identical images");
        Ok(1.0)
    }

    fn build_index(&mut self, images: &[Image]) -> VisionResult<SearchIndex> {
        warn!(count = images.len(), "dry run: fabricating index");
        Ok(SearchIndex::new(images.len()))
    }

    fn search(&mut self, index: &SearchIndex, query: &str, k: usize) -> VisionResult<Vec<usize>> {
        warn!(query, k, "dry run: returning images in load order");
        Ok((0..index.len.min(k)).collect())
    }

    fn train(&mut self, folder: &Path, model: Option<&str>) -> VisionResult<String> {
        warn!(folder = %folder.display(), "dry run: not training");
        Ok(model.unwrap_or("model").to_string())
    }

    fn label(&mut self, folder: &Path, classes: &[String]) -> VisionResult<()> {
        warn!(folder = %folder.display(), ?classes, "dry run: not labelling");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_a_quarter_turn_swaps_dimensions() {
        let image = Image::new("a.png", 640, 480);
        let rotated = DryRunVision.transform(&image, &Transform::Rotate(-90)).unwrap();

        assert_eq!((rotated.width, rotated.height), (480, 640));
        assert_eq!(DryRunVision.transform(&image, &Transform::Rotate(180)).unwrap().width, 640);
    }

    #[test]
    fn search_never_returns_more_than_indexed() {
        let index = SearchIndex::new(2);

        assert_eq!(DryRunVision.search(&index, "cat", 5).unwrap(), [0, 1]);
    }
}
