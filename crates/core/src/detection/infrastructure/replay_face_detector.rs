use std::collections::VecDeque;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::geometry::NormalizedRect;

/// One scripted detector response; `Err` carries the failure message.
pub type ScriptedDetections = Result<Vec<NormalizedRect>, String>;

/// Replays pre-recorded detection results, one entry per call.
///
/// Used to drive a session from a recorded scenario: only frames the
/// capture gate accepts reach the detector, so the n-th call corresponds
/// to the n-th cycle. Once the script is exhausted every call reports
/// no faces.
pub struct ReplayFaceDetector {
    script: VecDeque<ScriptedDetections>,
}

impl ReplayFaceDetector {
    pub fn new(script: impl IntoIterator<Item = ScriptedDetections>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect(
        &mut self,
        _frame: &Frame,
    ) -> Result<Vec<NormalizedRect>, Box<dyn std::error::Error>> {
        match self.script.pop_front() {
            Some(Ok(faces)) => Ok(faces),
            Some(Err(message)) => Err(message.into()),
            None => Ok(Vec::new()),
        }
    }
}
