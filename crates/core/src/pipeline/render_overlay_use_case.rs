use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::frames::domain::frame_source::FrameSource;
use crate::frames::domain::image_writer::ImageWriter;
use crate::overlay::domain::feature_selection::FeatureSelection;
use crate::overlay::overlay_renderer::{try_render_debug_rect, try_render_funny_face};
use crate::shared::geometry::NormalizedRect;

/// What to burn into the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayMode {
    /// Highlight one image-normalized rectangle (or nothing).
    DebugRect(Option<NormalizedRect>),
    /// Clown features for every detected face.
    FunnyFace(FeatureSelection),
}

/// Single-image overlay pipeline: read → detect → render → write.
pub struct RenderOverlayUseCase {
    reader: Box<dyn FrameSource>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    mode: OverlayMode,
}

impl RenderOverlayUseCase {
    pub fn new(
        reader: Box<dyn FrameSource>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        mode: OverlayMode,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            mode,
        }
    }

    /// Reads a single image, renders the overlay, and writes the output.
    ///
    /// Returns the number of faces the detector reported (0 in debug mode).
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input_path)?;
        log::info!(
            "Opened {}x{} image tagged {}",
            metadata.width,
            metadata.height,
            metadata.orientation
        );

        let frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let (rendered, faces) = match self.mode {
            OverlayMode::DebugRect(rect) => (try_render_debug_rect(&frame, rect.as_ref())?, 0),
            OverlayMode::FunnyFace(features) => {
                let observations = self.detector.detect(&frame)?;
                log::info!("Rendering {} face(s) with {features:?}", observations.len());
                let rendered = try_render_funny_face(&frame, &observations, features)?;
                (rendered, observations.len())
            }
        };

        self.image_writer.write(output_path, &rendered)?;
        Ok(faces)
    }
}
