use crate::shared::frame::Frame;

/// A camera-like stream of frames.
///
/// `start` fails when no input device is available; the session treats
/// that as fatal for the capture.
pub trait FrameSource: Send {
    /// Starts delivering frames.
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns the frames delivered since `start`.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Stops the stream. Safe to call repeatedly.
    fn stop(&mut self);
}
