use crate::shared::orientation::Orientation;

/// What a frame source reports about what it opened.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameMetadata {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}
