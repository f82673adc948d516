use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::frames::domain::image_writer::ImageWriter;
use crate::shared::raster_image::RasterImage;

/// Writes a rendered image to disk using the `image` crate.
///
/// Most formats written here have no orientation tag of their own, so the
/// tag is applied to the pixels before saving.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_dynamic(image: &RasterImage) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (w, h, data) = (image.width(), image.height(), image.data().to_vec());
    let img = match image.channels() {
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        _ => None,
    };
    img.ok_or_else(|| "Failed to create image from raster data".into())
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, image: &RasterImage) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut img = to_dynamic(image)?;
        img.apply_orientation(image.orientation().into());

        // JPEG has no alpha channel
        if is_jpeg(path) && img.color().has_alpha() {
            img = DynamicImage::ImageRgb8(img.into_rgb8());
        }

        img.save(path)?;
        Ok(())
    }
}
