/// Face bounding box in detector space.
///
/// All fields are fractions of the captured image, origin at the
/// bottom-left corner. Values outside [0, 1] are allowed (padded boxes)
/// and are never clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedRect {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }
}

/// Bounding box in display pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rect of the given size whose center sits at `(cx, cy)`.
    pub fn centered_at(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(&self, to: &Point) -> f64 {
        (self.x - to.x).hypot(self.y - to.y)
    }
}

/// Size of the display area markers are drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Capture orientation the translator distinguishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    LandscapeLeft,
    LandscapeRight,
}

/// Raw physical orientation reported by the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

impl Orientation {
    /// Capture orientation for a device orientation.
    ///
    /// The camera is mirrored relative to the device: a device held
    /// landscape-left captures landscape-right. Every other device
    /// orientation falls back to `LandscapeLeft`.
    pub fn from_device(device: DeviceOrientation) -> Self {
        match device {
            DeviceOrientation::LandscapeLeft => Orientation::LandscapeRight,
            _ => Orientation::LandscapeLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_center_of_rect() {
        let r = ScreenRect::new(10.0, 20.0, 100.0, 50.0);
        let c = r.center();
        assert_relative_eq!(c.x, 60.0);
        assert_relative_eq!(c.y, 45.0);
    }

    #[test]
    fn test_centered_at_round_trips_center() {
        let r = ScreenRect::centered_at(100.0, 100.0, 40.0, 30.0);
        assert_relative_eq!(r.x, 80.0);
        assert_relative_eq!(r.y, 85.0);
        assert_eq!(r.center(), Point { x: 100.0, y: 100.0 });
    }

    #[test]
    fn test_area() {
        assert_relative_eq!(ScreenRect::new(0.0, 0.0, 4.0, 2.5).area(), 10.0);
        assert_relative_eq!(Viewport::new(800.0, 600.0).area(), 480_000.0);
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = Point { x: 0.0, y: 0.0 };
        let b = Point { x: 3.0, y: 4.0 };
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_negative_size_propagates() {
        // Degenerate rects are not validated.
        let r = ScreenRect::new(0.0, 0.0, -10.0, 10.0);
        assert_relative_eq!(r.area(), -100.0);
        assert_relative_eq!(r.center().x, -5.0);
    }

    #[rstest]
    #[case::landscape_left(DeviceOrientation::LandscapeLeft, Orientation::LandscapeRight)]
    #[case::landscape_right(DeviceOrientation::LandscapeRight, Orientation::LandscapeLeft)]
    #[case::portrait(DeviceOrientation::Portrait, Orientation::LandscapeLeft)]
    #[case::upside_down(DeviceOrientation::PortraitUpsideDown, Orientation::LandscapeLeft)]
    #[case::face_up(DeviceOrientation::FaceUp, Orientation::LandscapeLeft)]
    #[case::face_down(DeviceOrientation::FaceDown, Orientation::LandscapeLeft)]
    #[case::unknown(DeviceOrientation::Unknown, Orientation::LandscapeLeft)]
    fn test_orientation_from_device(
        #[case] device: DeviceOrientation,
        #[case] expected: Orientation,
    ) {
        assert_eq!(Orientation::from_device(device), expected);
    }
}
