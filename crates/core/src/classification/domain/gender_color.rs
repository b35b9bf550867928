use crate::classification::domain::gender_classifier::Classification;
use crate::shared::color::Color;
use crate::shared::constants::{CLASSIFICATION_CONFIDENCE_THRESHOLD, MALE_LABEL};

/// Maps a classification to the marker tint.
///
/// Below `threshold` the marker stays neutral; otherwise "Male" is blue and
/// any other label is pink.
pub fn color_for(classification: &Classification, threshold: f64) -> Color {
    if classification.confidence < threshold {
        Color::NEUTRAL
    } else if classification.label == MALE_LABEL {
        Color::MALE
    } else {
        Color::FEMALE
    }
}

/// [`color_for`] with the default confidence threshold.
pub fn default_color_for(classification: &Classification) -> Color {
    color_for(classification, CLASSIFICATION_CONFIDENCE_THRESHOLD)
}
