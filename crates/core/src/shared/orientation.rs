//! Display orientation tag carried alongside a raw pixel buffer.
//!
//! The tag tells a display layer how to rotate/mirror the stored pixels.
//! Drawing never consults it; it is only rewritten once drawing is finished.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    Left,
    LeftMirrored,
    Right,
    RightMirrored,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::Left,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
    ];

    /// Tag for an image composited from a buffer carrying `self`.
    ///
    /// Pairs each rotation with its mirrored counterpart opposed on the
    /// mirror axis. Left/Right tags swap in pairs; the Up/Down family cycles
    /// Up → DownMirrored → Down → UpMirrored → Up.
    pub fn reconciled(self) -> Self {
        match self {
            Orientation::Up => Orientation::DownMirrored,
            Orientation::UpMirrored => Orientation::Up,
            Orientation::Down => Orientation::UpMirrored,
            Orientation::DownMirrored => Orientation::Down,
            Orientation::Left => Orientation::RightMirrored,
            Orientation::RightMirrored => Orientation::Left,
            Orientation::Right => Orientation::LeftMirrored,
            Orientation::LeftMirrored => Orientation::Right,
        }
    }

    /// Tag that undoes this one: quarter turns swap, flips are their own
    /// inverse.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
            other => other,
        }
    }

    /// Parses the kebab-case name used on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Orientation::Up),
            "up-mirrored" => Some(Orientation::UpMirrored),
            "down" => Some(Orientation::Down),
            "down-mirrored" => Some(Orientation::DownMirrored),
            "left" => Some(Orientation::Left),
            "left-mirrored" => Some(Orientation::LeftMirrored),
            "right" => Some(Orientation::Right),
            "right-mirrored" => Some(Orientation::RightMirrored),
            _ => None,
        }
    }
}

impl From<Orientation> for image::metadata::Orientation {
    fn from(o: Orientation) -> Self {
        use image::metadata::Orientation as Exif;
        match o {
            Orientation::Up => Exif::NoTransforms,
            Orientation::UpMirrored => Exif::FlipHorizontal,
            Orientation::Down => Exif::Rotate180,
            Orientation::DownMirrored => Exif::FlipVertical,
            Orientation::LeftMirrored => Exif::Rotate90FlipH,
            Orientation::Right => Exif::Rotate90,
            Orientation::RightMirrored => Exif::Rotate270FlipH,
            Orientation::Left => Exif::Rotate270,
        }
    }
}

impl From<image::metadata::Orientation> for Orientation {
    fn from(o: image::metadata::Orientation) -> Self {
        use image::metadata::Orientation as Exif;
        match o {
            Exif::NoTransforms => Orientation::Up,
            Exif::FlipHorizontal => Orientation::UpMirrored,
            Exif::Rotate180 => Orientation::Down,
            Exif::FlipVertical => Orientation::DownMirrored,
            Exif::Rotate90FlipH => Orientation::LeftMirrored,
            Exif::Rotate90 => Orientation::Right,
            Exif::Rotate270FlipH => Orientation::RightMirrored,
            Exif::Rotate270 => Orientation::Left,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Orientation::Up => "up",
            Orientation::UpMirrored => "up-mirrored",
            Orientation::Down => "down",
            Orientation::DownMirrored => "down-mirrored",
            Orientation::Left => "left",
            Orientation::LeftMirrored => "left-mirrored",
            Orientation::Right => "right",
            Orientation::RightMirrored => "right-mirrored",
        };
        write!(f, "{name}")
    }
}
