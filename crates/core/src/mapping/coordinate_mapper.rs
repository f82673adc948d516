//! Normalized (bottom-left origin, unit square) → absolute pixel coordinates.
//!
//! Generic rectangles are image-normalized and map directly. Landmark points
//! are normalized to their face's bounding box and must be composed through
//! that box before scaling; scaling them by image size alone lands them in the
//! wrong place.

use crate::detection::domain::face_observation::LandmarkRegion;
use crate::shared::geometry::{AbsolutePoint, AbsoluteRect, NormalizedPoint, NormalizedRect};

pub fn map_rect(rect: &NormalizedRect, width: u32, height: u32) -> AbsoluteRect {
    let (w, h) = (width as f64, height as f64);
    AbsoluteRect::new(
        rect.x * w,
        (1.0 - rect.y - rect.height) * h,
        rect.width * w,
        rect.height * h,
    )
}

/// Bounding-box-relative landmark point → image-normalized point.
pub fn compose_landmark_point(
    point: &NormalizedPoint,
    bounding_box: &NormalizedRect,
) -> NormalizedPoint {
    NormalizedPoint::new(
        bounding_box.x + point.x * bounding_box.width,
        bounding_box.y + point.y * bounding_box.height,
    )
}

pub fn map_landmark_point(
    point: &NormalizedPoint,
    bounding_box: &NormalizedRect,
    width: u32,
    height: u32,
) -> AbsolutePoint {
    let global = compose_landmark_point(point, bounding_box);
    AbsolutePoint::new(global.x * width as f64, (1.0 - global.y) * height as f64)
}

/// Maps every point of a region, keeping the detector's order.
pub fn map_landmark_region(
    region: &LandmarkRegion,
    bounding_box: &NormalizedRect,
    width: u32,
    height: u32,
) -> Vec<AbsolutePoint> {
    region
        .points()
        .iter()
        .map(|p| map_landmark_point(p, bounding_box, width, height))
        .collect()
}

/// Pixel bounds of a landmark region; `None` when the region has no points.
pub fn landmark_bounds(
    region: &LandmarkRegion,
    bounding_box: &NormalizedRect,
    width: u32,
    height: u32,
) -> Option<AbsoluteRect> {
    AbsoluteRect::bounding(&map_landmark_region(region, bounding_box, width, height))
}
