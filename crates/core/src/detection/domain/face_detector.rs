use crate::shared::frame::Frame;
use crate::shared::geometry::NormalizedRect;

/// Domain interface for the face detection oracle.
///
/// Returns one normalized box per face. Errors are absorbed by the caller
/// and treated as "no faces this cycle".
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<NormalizedRect>, Box<dyn std::error::Error>>;
}
