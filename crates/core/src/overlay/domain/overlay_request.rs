use crate::detection::domain::face_observation::FaceObservation;
use crate::overlay::domain::feature_selection::FeatureSelection;

/// One funny-face render: which features, drawn from which faces.
///
/// Borrowed for the duration of a single render call only.
#[derive(Clone, Copy, Debug)]
pub struct OverlayRequest<'a> {
    pub features: FeatureSelection,
    pub observations: &'a [FaceObservation],
}

impl<'a> OverlayRequest<'a> {
    pub fn new(observations: &'a [FaceObservation], features: FeatureSelection) -> Self {
        Self {
            features,
            observations,
        }
    }
}
