use std::path::Path;

use crate::shared::raster_image::RasterImage;

/// Persists a rendered image so that it displays upright.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, image: &RasterImage) -> Result<(), Box<dyn std::error::Error>>;
}
