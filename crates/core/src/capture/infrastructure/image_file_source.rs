use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Streams a still image file as if it were a camera.
///
/// The image is decoded with the `image` crate on `start`; every call to
/// `frames` then yields a burst of identical RGB frames with increasing
/// indices, the way a live preview keeps delivering frames until stopped.
pub struct ImageFileSource {
    path: PathBuf,
    burst: usize,
    frame: Option<Frame>,
    next_index: usize,
}

impl ImageFileSource {
    pub fn new(path: impl AsRef<Path>, burst: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            burst: burst.max(1),
            frame: None,
            next_index: 0,
        }
    }

    /// Reads the image size from the file header without decoding pixels.
    pub fn dimensions(&self) -> Result<(u32, u32), Box<dyn std::error::Error>> {
        Ok(image::image_dimensions(&self.path)?)
    }
}

impl FrameSource for ImageFileSource {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.frame.is_some() {
            return Ok(());
        }
        let img = image::open(&self.path)?.to_rgb8();
        let (width, height) = img.dimensions();
        self.frame = Some(Frame::new(
            img.into_raw(),
            width,
            height,
            3,
            self.next_index,
        ));
        log::debug!("Decoded {} ({width}x{height})", self.path.display());
        Ok(())
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(base) = self.frame.as_ref() else {
            return Box::new(std::iter::once(Err("ImageFileSource: not started".into())));
        };
        let first = self.next_index;
        self.next_index += self.burst;
        let frames = (0..self.burst).map(move |k| Ok(base.clone().with_index(first + k)));
        Box::new(frames)
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}
