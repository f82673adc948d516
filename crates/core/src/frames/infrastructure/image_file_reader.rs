use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::frames::domain::frame_metadata::FrameMetadata;
use crate::frames::domain::frame_source::FrameSource;
use crate::shared::orientation::Orientation;
use crate::shared::raster_image::RasterImage;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// The EXIF orientation is read from the decoder and kept as the frame's
/// tag; pixels stay exactly as stored. Images with alpha decode as RGBA,
/// everything else as RGB.
pub struct ImageFileReader {
    frame: Option<RasterImage>,
    metadata: Option<FrameMetadata>,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self {
            frame: None,
            metadata: None,
        }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(path: &Path) -> Result<RasterImage, Box<dyn std::error::Error>> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let orientation = match decoder.orientation() {
        Ok(o) => Orientation::from(o),
        Err(e) => {
            log::warn!("Could not read orientation of {}: {e}", path.display());
            Orientation::Up
        }
    };
    if orientation != Orientation::Up {
        log::debug!("{} is tagged {orientation}", path.display());
    }

    let img = DynamicImage::from_decoder(decoder)?;
    let (width, height) = (img.width(), img.height());
    let frame = if img.color().has_alpha() {
        RasterImage::new(img.into_rgba8().into_raw(), width, height, 4, 1.0, orientation)
    } else {
        RasterImage::new(img.into_rgb8().into_raw(), width, height, 3, 1.0, orientation)
    };
    Ok(frame)
}

impl FrameSource for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<FrameMetadata, Box<dyn std::error::Error>> {
        let frame = decode(path)?;

        let metadata = FrameMetadata {
            width: frame.width(),
            height: frame.height(),
            orientation: frame.orientation(),
        };
        self.frame = Some(frame);
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<RasterImage, Box<dyn std::error::Error>>> + '_> {
        if self.frame.is_none() {
            return Box::new(std::iter::once(Err("ImageFileReader: not opened".into())));
        }
        Box::new(self.frame.take().into_iter().map(Ok))
    }

    fn close(&mut self) {
        self.frame = None;
        self.metadata = None;
    }
}
