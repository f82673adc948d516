use thiserror::Error;

/// Reasons an overlay render produces no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("source image has no readable pixel data: {0}")]
    UnreadableImage(String),
    #[error("drawing surface unavailable for {width}x{height} image")]
    SurfaceUnavailable { width: u32, height: u32 },
}
