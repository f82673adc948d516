use serde::{Deserialize, Serialize};

/// Which clown features to draw; each toggles independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelection {
    pub eyes: bool,
    pub nose: bool,
    pub mouth: bool,
}

impl FeatureSelection {
    pub const NAMES: &[&str] = &["eyes", "nose", "mouth"];

    pub fn all() -> Self {
        Self {
            eyes: true,
            nose: true,
            mouth: true,
        }
    }

    pub fn none() -> Self {
        Self {
            eyes: false,
            nose: false,
            mouth: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.eyes || self.nose || self.mouth)
    }

    /// Builds a selection from feature names (`eyes`, `nose`, `mouth`).
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut selection = Self::none();
        for name in names {
            match name.as_ref().trim() {
                "eyes" => selection.eyes = true,
                "nose" => selection.nose = true,
                "mouth" => selection.mouth = true,
                other => {
                    return Err(format!(
                        "Unknown feature '{other}', expected one of: {}",
                        Self::NAMES.join(", ")
                    ))
                }
            }
        }
        Ok(selection)
    }
}

impl Default for FeatureSelection {
    fn default() -> Self {
        Self::all()
    }
}
