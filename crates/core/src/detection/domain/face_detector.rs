use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster_image::RasterImage;

/// Domain interface for the external face/landmark analyzer.
///
/// Implementations may be stateful (e.g., caching across frames),
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        image: &RasterImage,
    ) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>>;
}
