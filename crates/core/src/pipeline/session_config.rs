use crate::shared::constants::{
    CLASSIFICATION_CONFIDENCE_THRESHOLD, CLASSIFICATION_CROP_PADDING, ORACLE_CHANNEL_CAPACITY,
};

/// Tunables for a [`CaptureSession`](super::capture_session::CaptureSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Fraction of the image added on each side of a face before classifying it.
    pub crop_padding: f64,
    /// Minimum classifier confidence for a gendered marker color.
    pub confidence_threshold: f64,
    /// Queue depth between the session and each oracle worker.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            crop_padding: CLASSIFICATION_CROP_PADDING,
            confidence_threshold: CLASSIFICATION_CONFIDENCE_THRESHOLD,
            channel_capacity: ORACLE_CHANNEL_CAPACITY,
        }
    }
}
