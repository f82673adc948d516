use serde::{Deserialize, Serialize};

use crate::shared::geometry::{NormalizedPoint, NormalizedRect};

/// Ordered outline of one facial feature, in face-landmark-normalized space.
///
/// Point order is the detector's and is significant for contours.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkRegion {
    points: Vec<NormalizedPoint>,
}

impl LandmarkRegion {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One detected face: its image-normalized bounding box plus whichever
/// landmark regions the detector managed to locate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eye: Option<LandmarkRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eye: Option<LandmarkRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nose: Option<LandmarkRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_lips: Option<LandmarkRegion>,
}

impl FaceObservation {
    pub fn new(bounding_box: NormalizedRect) -> Self {
        Self {
            bounding_box,
            left_eye: None,
            right_eye: None,
            nose: None,
            outer_lips: None,
        }
    }

    /// Eye regions in drawing order (left, then right), skipping absent ones.
    pub fn eyes(&self) -> impl Iterator<Item = &LandmarkRegion> {
        self.left_eye.iter().chain(self.right_eye.iter())
    }
}
