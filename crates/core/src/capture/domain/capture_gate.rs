/// Single-shot capture state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
    /// Live preview; frames are ignored.
    #[default]
    Idle,
    /// The user asked for a capture; the next frame is taken.
    RequestAwaiting,
    /// One frame was taken; the stream is stopped until reset.
    Captured,
}

/// Gates the camera stream so exactly one frame is processed per request.
#[derive(Clone, Debug, Default)]
pub struct CaptureGate {
    mode: CaptureMode,
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Idle → RequestAwaiting. Returns whether the transition happened.
    pub fn request(&mut self) -> bool {
        if self.mode != CaptureMode::Idle {
            return false;
        }
        self.mode = CaptureMode::RequestAwaiting;
        true
    }

    /// Captured → Idle. Returns whether the transition happened.
    pub fn reset(&mut self) -> bool {
        if self.mode != CaptureMode::Captured {
            return false;
        }
        self.mode = CaptureMode::Idle;
        true
    }

    /// A frame arrived from the stream. Returns `true` only for the one
    /// frame that satisfies a pending request.
    pub fn offer(&mut self) -> bool {
        if self.mode != CaptureMode::RequestAwaiting {
            return false;
        }
        self.mode = CaptureMode::Captured;
        true
    }

    /// User tap: requests a capture from the live preview, or dismisses a
    /// captured still. A tap while a request is pending changes nothing.
    pub fn tap(&mut self) -> CaptureMode {
        match self.mode {
            CaptureMode::Idle => {
                self.request();
            }
            CaptureMode::Captured => {
                self.reset();
            }
            CaptureMode::RequestAwaiting => {}
        }
        self.mode
    }
}
