use std::path::Path;

use crate::frames::domain::frame_metadata::FrameMetadata;
use crate::shared::raster_image::RasterImage;

/// Domain interface for anything that yields raster frames with their
/// orientation tag: a captured photo, a camera feed, a test stub.
pub trait FrameSource: Send {
    fn open(&mut self, path: &Path) -> Result<FrameMetadata, Box<dyn std::error::Error>>;

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<RasterImage, Box<dyn std::error::Error>>> + '_>;

    fn close(&mut self);
}
