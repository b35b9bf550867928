use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use facemark_core::classification::domain::classification_crop::crop_window;
use facemark_core::classification::domain::gender_classifier::Classification;
use facemark_core::classification::infrastructure::replay_gender_classifier::ScriptedClassification;
use facemark_core::detection::infrastructure::replay_face_detector::ScriptedDetections;
use facemark_core::shared::geometry::{DeviceOrientation, NormalizedRect, Viewport};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// A recorded capture session: display setup plus what the detector and
/// classifier report for each capture.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub viewport: ScenarioViewport,
    #[serde(default)]
    pub device_orientation: Option<ScenarioOrientation>,
    #[serde(default)]
    pub capture: ScenarioCapture,
    pub cycles: Vec<ScenarioCycle>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioViewport {
    pub width: f64,
    pub height: f64,
}

/// Size of the synthetic camera frames when no image is given.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioCapture {
    pub width: u32,
    pub height: u32,
}

impl Default for ScenarioCapture {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOrientation {
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioCycle {
    #[serde(default)]
    pub viewport: Option<ScenarioViewport>,
    #[serde(default)]
    pub device_orientation: Option<ScenarioOrientation>,
    /// Makes the detector fail for this capture.
    #[serde(default)]
    pub detector_error: Option<String>,
    #[serde(default)]
    pub faces: Vec<ScenarioFace>,
}

/// One detected face, bottom-left origin, normalized to the capture.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFace {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: Option<String>,
    /// Defaults to 1.0 when a label is given.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Makes the classifier fail for this face.
    #[serde(default)]
    pub classifier_error: Option<String>,
}

impl From<ScenarioViewport> for Viewport {
    fn from(entry: ScenarioViewport) -> Self {
        Viewport::new(entry.width, entry.height)
    }
}

impl From<ScenarioOrientation> for DeviceOrientation {
    fn from(entry: ScenarioOrientation) -> Self {
        match entry {
            ScenarioOrientation::Unknown => DeviceOrientation::Unknown,
            ScenarioOrientation::Portrait => DeviceOrientation::Portrait,
            ScenarioOrientation::PortraitUpsideDown => DeviceOrientation::PortraitUpsideDown,
            ScenarioOrientation::LandscapeLeft => DeviceOrientation::LandscapeLeft,
            ScenarioOrientation::LandscapeRight => DeviceOrientation::LandscapeRight,
            ScenarioOrientation::FaceUp => DeviceOrientation::FaceUp,
            ScenarioOrientation::FaceDown => DeviceOrientation::FaceDown,
        }
    }
}

impl ScenarioFace {
    pub fn bbox(&self) -> NormalizedRect {
        NormalizedRect::new(self.x, self.y, self.width, self.height)
    }

    fn classification(&self) -> ScriptedClassification {
        if let Some(message) = &self.classifier_error {
            return Err(message.clone());
        }
        Ok(self
            .label
            .as_ref()
            .map(|label| Classification::new(label.clone(), self.confidence.unwrap_or(1.0))))
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.cycles.is_empty() {
            return Err(ScenarioError::Invalid("no cycles".into()));
        }
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ScenarioError::Invalid(format!(
                "capture size must be positive, got {}x{}",
                self.capture.width, self.capture.height
            )));
        }
        validate_viewport(&self.viewport)?;

        for (i, cycle) in self.cycles.iter().enumerate() {
            if let Some(viewport) = &cycle.viewport {
                validate_viewport(viewport)?;
            }
            for face in &cycle.faces {
                let values = [face.x, face.y, face.width, face.height];
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(ScenarioError::Invalid(format!(
                        "cycle {}: face coordinates must be finite",
                        i + 1
                    )));
                }
                if let Some(confidence) = face.confidence {
                    if !(0.0..=1.0).contains(&confidence) {
                        return Err(ScenarioError::Invalid(format!(
                            "cycle {}: confidence must be between 0.0 and 1.0, got {confidence}",
                            i + 1
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Detector responses, one per capture.
    pub fn detection_script(&self) -> Vec<ScriptedDetections> {
        self.cycles
            .iter()
            .map(|cycle| match &cycle.detector_error {
                Some(message) => Err(message.clone()),
                None => Ok(cycle.faces.iter().map(ScenarioFace::bbox).collect()),
            })
            .collect()
    }

    /// Classifier responses in the order the session asks for them: per
    /// capture, per face, skipping faces whose padded crop misses a frame
    /// of `width` × `height` and captures whose detection fails.
    pub fn classification_script(
        &self,
        width: u32,
        height: u32,
        padding: f64,
    ) -> Vec<ScriptedClassification> {
        self.cycles
            .iter()
            .filter(|cycle| cycle.detector_error.is_none())
            .flat_map(|cycle| cycle.faces.iter())
            .filter(|face| crop_window(&face.bbox(), width, height, padding).is_some())
            .map(ScenarioFace::classification)
            .collect()
    }
}

fn validate_viewport(viewport: &ScenarioViewport) -> Result<(), ScenarioError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(viewport.width) || !valid(viewport.height) {
        return Err(ScenarioError::Invalid(format!(
            "viewport must be positive, got {}x{}",
            viewport.width, viewport.height
        )));
    }
    Ok(())
}
