use crate::shared::geometry::{DeviceOrientation, NormalizedRect, Orientation, ScreenRect, Viewport};

/// Maps a detector box onto the display.
///
/// Normalized boxes use a bottom-left origin; screen rects use a top-left
/// origin. In `LandscapeLeft` the capture is mirrored horizontally and the
/// vertical axis already points down; in `LandscapeRight` the horizontal
/// axis is kept and the vertical axis is flipped.
///
/// No clamping: boxes padded past [0, 1] map past the viewport edges.
pub fn convert(bbox: &NormalizedRect, viewport: Viewport, orientation: Orientation) -> ScreenRect {
    let width = viewport.width * bbox.width;
    let height = viewport.height * bbox.height;

    let (x, y) = match orientation {
        Orientation::LandscapeLeft => (
            viewport.width * (1.0 - bbox.origin_x) - width,
            viewport.height * bbox.origin_y,
        ),
        Orientation::LandscapeRight => (
            viewport.width * bbox.origin_x,
            viewport.height * (1.0 - bbox.origin_y) - height,
        ),
    };

    ScreenRect::new(x, y, width, height)
}

/// Holds the current viewport and orientation so callers convert boxes
/// without threading display state through every call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinateTranslator {
    viewport: Viewport,
    orientation: Orientation,
}

impl CoordinateTranslator {
    pub fn new(viewport: Viewport, orientation: Orientation) -> Self {
        Self {
            viewport,
            orientation,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_device_orientation(&mut self, device: DeviceOrientation) {
        self.orientation = Orientation::from_device(device);
    }

    pub fn convert(&self, bbox: &NormalizedRect) -> ScreenRect {
        convert(bbox, self.viewport, self.orientation)
    }
}
