use crate::shared::frame::Frame;

/// Top result of the gender oracle for one face crop.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub label: String,
    /// In [0, 1].
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Domain interface for the gender classification oracle.
///
/// `Ok(None)` means the oracle ran but produced no result. Both that and
/// an error leave the marker color unchanged.
pub trait GenderClassifier: Send {
    fn classify(
        &mut self,
        crop: &Frame,
    ) -> Result<Option<Classification>, Box<dyn std::error::Error>>;
}
