use std::path::Path;

use crate::frames::domain::frame_metadata::FrameMetadata;
use crate::frames::domain::frame_source::FrameSource;
use crate::shared::orientation::Orientation;
use crate::shared::raster_image::RasterImage;

#[derive(Clone, Copy, Debug)]
struct Overrides {
    orientation: Option<Orientation>,
    scale: Option<f64>,
}

impl Overrides {
    fn apply(self, frame: RasterImage) -> RasterImage {
        let frame = match self.orientation {
            Some(o) => frame.with_orientation(o),
            None => frame,
        };
        match self.scale {
            Some(s) => frame.with_scale(s),
            None => frame,
        }
    }
}

/// Decorator that overrides the orientation tag and/or display scale of
/// every frame its inner source yields. Pixels pass through untouched.
pub struct TaggedFrameSource {
    inner: Box<dyn FrameSource>,
    overrides: Overrides,
}

impl TaggedFrameSource {
    pub fn new(
        inner: Box<dyn FrameSource>,
        orientation: Option<Orientation>,
        scale: Option<f64>,
    ) -> Result<Self, &'static str> {
        if let Some(s) = scale {
            if !(s.is_finite() && s > 0.0) {
                return Err("scale must be a positive number");
            }
        }
        Ok(Self {
            inner,
            overrides: Overrides { orientation, scale },
        })
    }
}

impl FrameSource for TaggedFrameSource {
    fn open(&mut self, path: &Path) -> Result<FrameMetadata, Box<dyn std::error::Error>> {
        let mut metadata = self.inner.open(path)?;
        if let Some(o) = self.overrides.orientation {
            log::info!("Overriding orientation {} with {o}", metadata.orientation);
            metadata.orientation = o;
        }
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<RasterImage, Box<dyn std::error::Error>>> + '_> {
        let overrides = self.overrides;
        Box::new(
            self.inner
                .frames()
                .map(move |result| result.map(|frame| overrides.apply(frame))),
        )
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
