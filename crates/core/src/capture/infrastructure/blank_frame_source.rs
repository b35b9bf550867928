use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

const BLANK_PIXEL: [u8; 3] = [128, 128, 128];

/// Synthetic camera producing uniform gray frames of a fixed size.
///
/// Stands in for a real device when only the detection script matters.
pub struct BlankFrameSource {
    width: u32,
    height: u32,
    burst: usize,
    available: bool,
    running: bool,
    next_index: usize,
}

impl BlankFrameSource {
    pub fn new(width: u32, height: u32, burst: usize) -> Self {
        Self {
            width,
            height,
            burst: burst.max(1),
            available: true,
            running: false,
            next_index: 0,
        }
    }

    /// A source with no device behind it: `start` always fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(0, 0, 1)
        }
    }
}

impl FrameSource for BlankFrameSource {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.available {
            return Err("no video capture device".into());
        }
        self.running = true;
        Ok(())
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if !self.running {
            return Box::new(std::iter::empty());
        }
        let (width, height) = (self.width, self.height);
        let first = self.next_index;
        self.next_index += self.burst;
        let frames = (first..first + self.burst)
            .map(move |i| Ok(Frame::filled(width, height, BLANK_PIXEL, i)));
        Box::new(frames)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frames_before_start() {
        let mut source = BlankFrameSource::new(4, 4, 2);
        assert_eq!(source.frames().count(), 0);
    }

    #[test]
    fn test_burst_of_uniform_frames() {
        let mut source = BlankFrameSource::new(6, 4, 2);
        source.start().unwrap();

        let frames: Vec<Frame> = source.frames().map(|f| f.unwrap()).collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].index(), 0);
        assert_eq!(frames[1].index(), 1);
        assert_eq!(frames[0].width(), 6);
        assert!(frames[0].data().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_stop_ends_stream() {
        let mut source = BlankFrameSource::new(4, 4, 1);
        source.start().unwrap();
        source.stop();
        assert_eq!(source.frames().count(), 0);
    }

    #[test]
    fn test_unavailable_device_fails_to_start() {
        let mut source = BlankFrameSource::unavailable();
        assert!(source.start().is_err());
        assert_eq!(source.frames().count(), 0);
    }
}
