use serde::{Deserialize, Serialize};

/// A point in a unit square with its origin at the bottom-left.
///
/// The same representation is used for two frames: relative to the whole
/// image, and relative to a face observation's bounding box. Which one applies
/// is decided by where the point came from, never by its value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An image-normalized rectangle; `(x, y)` is its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel position in the unrotated buffer frame (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsolutePoint {
    pub x: f64,
    pub y: f64,
}

impl AbsolutePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Pixel rectangle in the unrotated buffer frame; `(x, y)` is the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsoluteRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AbsoluteRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Axis-aligned bounds of a point set; `None` when there are no points.
    pub fn bounding(points: &[AbsolutePoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn center(&self) -> AbsolutePoint {
        AbsolutePoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
