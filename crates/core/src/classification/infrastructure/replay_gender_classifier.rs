use std::collections::VecDeque;

use crate::classification::domain::gender_classifier::{Classification, GenderClassifier};
use crate::shared::frame::Frame;

/// One scripted classifier response; `Err` carries the failure message.
pub type ScriptedClassification = Result<Option<Classification>, String>;

/// Replays pre-recorded classifications, one entry per call.
///
/// The session requests classifications in detection order, so a script
/// laid out face by face, cycle by cycle, lines up with the requests.
/// Calls past the end of the script yield no result.
pub struct ReplayGenderClassifier {
    script: VecDeque<ScriptedClassification>,
}

impl ReplayGenderClassifier {
    pub fn new(script: impl IntoIterator<Item = ScriptedClassification>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl GenderClassifier for ReplayGenderClassifier {
    fn classify(
        &mut self,
        _crop: &Frame,
    ) -> Result<Option<Classification>, Box<dyn std::error::Error>> {
        match self.script.pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(message.into()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> Frame {
        Frame::filled(4, 4, [9, 9, 9], 0)
    }

    #[test]
    fn test_replays_in_order() {
        let mut classifier = ReplayGenderClassifier::new([
            Ok(Some(Classification::new("Male", 0.9))),
            Ok(None),
            Ok(Some(Classification::new("Female", 0.8))),
        ]);

        assert_eq!(
            classifier.classify(&crop()).unwrap(),
            Some(Classification::new("Male", 0.9))
        );
        assert_eq!(classifier.classify(&crop()).unwrap(), None);
        assert_eq!(
            classifier.classify(&crop()).unwrap().map(|c| c.label),
            Some("Female".to_string())
        );
    }

    #[test]
    fn test_failure_and_exhaustion() {
        let mut classifier = ReplayGenderClassifier::new([Err("timeout".to_string())]);

        assert_eq!(
            classifier.classify(&crop()).unwrap_err().to_string(),
            "timeout"
        );
        assert_eq!(classifier.classify(&crop()).unwrap(), None);
    }
}
