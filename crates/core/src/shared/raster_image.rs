use image::RgbaImage;

use crate::shared::error::OverlayError;
use crate::shared::orientation::Orientation;

/// A still image or camera frame: interleaved 8-bit pixels in row-major order.
///
/// Pixels are stored as captured; `orientation` only says how a display layer
/// should rotate/mirror them. `scale` is the display scale factor (points to
/// pixels) and is carried through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    scale: f64,
    orientation: Orientation,
}

impl RasterImage {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        scale: f64,
        orientation: Orientation,
    ) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            scale,
            orientation,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// RGBA copy of the pixels, or why none can be produced.
    pub fn to_rgba(&self) -> Result<RgbaImage, OverlayError> {
        if self.width == 0 || self.height == 0 {
            return Err(OverlayError::UnreadableImage(format!(
                "empty {}x{} buffer",
                self.width, self.height
            )));
        }
        let expected = (self.width as usize) * (self.height as usize) * (self.channels as usize);
        if self.data.len() != expected {
            return Err(OverlayError::UnreadableImage(format!(
                "expected {expected} bytes for {}x{}x{}, got {}",
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }

        let rgba = match self.channels {
            4 => self.data.clone(),
            3 => self
                .data
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
            n => {
                return Err(OverlayError::UnreadableImage(format!(
                    "unsupported channel count {n}"
                )))
            }
        };

        RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| OverlayError::UnreadableImage("buffer size mismatch".into()))
    }

    /// Builds an image with this one's layout and scale from RGBA pixels.
    ///
    /// RGB sources drop the alpha channel again, so an untouched RGB pixel
    /// survives the round trip byte for byte.
    pub fn with_rgba_pixels(&self, pixels: RgbaImage, orientation: Orientation) -> Self {
        let (width, height) = pixels.dimensions();
        let raw = pixels.into_raw();
        let data = if self.channels == 3 {
            raw.chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect()
        } else {
            raw
        };
        Self::new(data, width, height, self.channels, self.scale, orientation)
    }

    /// Channel values of the pixel at `(x, y)`.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * c;
        &self.data[idx..idx + c]
    }
}
