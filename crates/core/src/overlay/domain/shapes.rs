//! Pure overlay geometry: absolute pixel inputs in, paintable primitives out.
//!
//! Nothing here touches pixels, so each feature's sizing rules are testable
//! without a drawing surface.

use crate::shared::constants::{
    DEBUG_FILL_RGBA, DEBUG_STROKE_RGBA, DEBUG_STROKE_WIDTH, EYE_RGBA, EYE_SIZE_FACTOR,
    MOUTH_INNER_OFFSET, MOUTH_INNER_RGBA, MOUTH_INNER_WIDTH, MOUTH_OUTER_RGBA, MOUTH_OUTER_WIDTH,
    NOSE_RADIUS_FACTOR, NOSE_RGBA, PUPIL_OFFSET_FACTOR, PUPIL_RADIUS_FACTOR, PUPIL_RGBA,
};
use crate::shared::geometry::{AbsolutePoint, AbsoluteRect};

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: AbsolutePoint,
    pub radius: f64,
    pub rgba: [u8; 4],
}

/// Polyline whose last point joins back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedStroke {
    pub points: Vec<AbsolutePoint>,
    pub width: f64,
    pub rgba: [u8; 4],
}

/// Something a drawing surface knows how to paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    FilledCircle(Circle),
    ClosedStroke(ClosedStroke),
    /// Alpha-blended fill.
    FilledRect { rect: AbsoluteRect, rgba: [u8; 4] },
    /// Border stroke centred on the rectangle's edges.
    StrokedRect {
        rect: AbsoluteRect,
        width: f64,
        rgba: [u8; 4],
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EyeShape {
    pub white: Circle,
    pub pupil: Circle,
}

impl EyeShape {
    /// White first, pupil on top.
    pub fn primitives(self) -> [Primitive; 2] {
        [
            Primitive::FilledCircle(self.white),
            Primitive::FilledCircle(self.pupil),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MouthShape {
    pub outer: ClosedStroke,
    pub inner: ClosedStroke,
}

impl MouthShape {
    /// Outer lip first, inner lip on top.
    pub fn primitives(self) -> [Primitive; 2] {
        [
            Primitive::ClosedStroke(self.outer),
            Primitive::ClosedStroke(self.inner),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DebugRectShape {
    pub rect: AbsoluteRect,
}

impl DebugRectShape {
    /// Translucent fill, then the border.
    pub fn primitives(self) -> [Primitive; 2] {
        [
            Primitive::FilledRect {
                rect: self.rect,
                rgba: DEBUG_FILL_RGBA,
            },
            Primitive::StrokedRect {
                rect: self.rect,
                width: DEBUG_STROKE_WIDTH,
                rgba: DEBUG_STROKE_RGBA,
            },
        ]
    }
}

pub fn eye_shape(bounds: &AbsoluteRect) -> EyeShape {
    let center = bounds.center();
    let size = bounds.min_side() * EYE_SIZE_FACTOR;
    EyeShape {
        white: Circle {
            center,
            radius: size,
            rgba: EYE_RGBA,
        },
        pupil: Circle {
            center: center.offset(0.0, size * PUPIL_OFFSET_FACTOR),
            radius: size * PUPIL_RADIUS_FACTOR,
            rgba: PUPIL_RGBA,
        },
    }
}

pub fn nose_shape(bounds: &AbsoluteRect) -> Circle {
    Circle {
        center: bounds.center(),
        radius: bounds.min_side() * NOSE_RADIUS_FACTOR,
        rgba: NOSE_RGBA,
    }
}

/// Lips traced through the contour in detector order.
pub fn mouth_shape(contour: &[AbsolutePoint]) -> MouthShape {
    MouthShape {
        outer: ClosedStroke {
            points: contour.to_vec(),
            width: MOUTH_OUTER_WIDTH,
            rgba: MOUTH_OUTER_RGBA,
        },
        inner: ClosedStroke {
            points: contour
                .iter()
                .map(|p| p.offset(0.0, MOUTH_INNER_OFFSET))
                .collect(),
            width: MOUTH_INNER_WIDTH,
            rgba: MOUTH_INNER_RGBA,
        },
    }
}

pub fn debug_rect_shape(rect: AbsoluteRect) -> DebugRectShape {
    DebugRectShape { rect }
}
