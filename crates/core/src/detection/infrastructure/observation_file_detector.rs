use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster_image::RasterImage;

#[derive(Error, Debug)]
pub enum ObservationFileError {
    #[error("failed to read observations from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed observations in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the external analyzer's output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationDocument {
    #[serde(default)]
    pub observations: Vec<FaceObservation>,
}

/// Replays face observations exported by an external analyzer.
///
/// The document is parsed once; every frame gets the same observations,
/// which is what a still photo with a sidecar analysis file needs.
pub struct ObservationFileDetector {
    observations: Vec<FaceObservation>,
}

impl ObservationFileDetector {
    pub fn new(observations: Vec<FaceObservation>) -> Self {
        Self { observations }
    }

    pub fn open(path: &Path) -> Result<Self, ObservationFileError> {
        let json = fs::read_to_string(path).map_err(|source| ObservationFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: ObservationDocument =
            serde_json::from_str(&json).map_err(|source| ObservationFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "Loaded {} face observation(s) from {}",
            doc.observations.len(),
            path.display()
        );
        Ok(Self::new(doc.observations))
    }
}

impl FaceDetector for ObservationFileDetector {
    fn detect(
        &mut self,
        _image: &RasterImage,
    ) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
        Ok(self.observations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::NormalizedRect;
    use crate::shared::orientation::Orientation;

    fn image() -> RasterImage {
        RasterImage::new(vec![0u8; 10 * 10 * 3], 10, 10, 3, 1.0, Orientation::Up)
    }

    fn write_json(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("faces.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_open_parses_observations_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            dir.path(),
            r#"{"observations": [
                {"bounding_box": {"x": 0.1, "y": 0.1, "width": 0.2, "height": 0.2}},
                {"bounding_box": {"x": 0.6, "y": 0.6, "width": 0.3, "height": 0.3}}
            ]}"#,
        );

        let mut detector = ObservationFileDetector::open(&path).unwrap();
        let result = detector.detect(&image()).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].bounding_box, NormalizedRect::new(0.1, 0.1, 0.2, 0.2));
        assert_eq!(result[1].bounding_box, NormalizedRect::new(0.6, 0.6, 0.3, 0.3));
    }

    #[test]
    fn test_missing_observations_key_means_no_faces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "{}");
        let mut detector = ObservationFileDetector::open(&path).unwrap();
        assert!(detector.detect(&image()).unwrap().is_empty());
    }

    #[test]
    fn test_same_observations_every_frame() {
        let obs = vec![FaceObservation::new(NormalizedRect::new(0.0, 0.0, 0.5, 0.5))];
        let mut detector = ObservationFileDetector::new(obs.clone());
        assert_eq!(detector.detect(&image()).unwrap(), obs);
        assert_eq!(detector.detect(&image()).unwrap(), obs);
    }

    #[test]
    fn test_open_nonexistent_is_read_error() {
        let err = ObservationFileDetector::open(Path::new("/nonexistent/faces.json"))
            .err()
            .unwrap();
        assert!(matches!(err, ObservationFileError::Read { .. }));
    }

    #[test]
    fn test_open_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), r#"{"observations": [{"nose": []}]}"#);
        let err = ObservationFileDetector::open(&path).err().unwrap();
        assert!(matches!(err, ObservationFileError::Parse { .. }));
        assert!(err.to_string().contains("faces.json"));
    }
}
