use ndarray::{s, ArrayView3};

/// One captured still: contiguous RGB bytes in row-major order, first row
/// at the top of the image.
///
/// `index` is the position of the frame in its source stream.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// RGB frame where every pixel has the same value.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3], index: usize) -> Self {
        let pixels = (width as usize) * (height as usize);
        let data = rgb.iter().copied().cycle().take(pixels * 3).collect();
        Self::new(data, width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixel rectangle starting at column `x`, row `y`.
    ///
    /// The rectangle must lie inside the frame; the copy keeps this
    /// frame's index.
    pub fn sub_frame(&self, x: u32, y: u32, width: u32, height: u32) -> Frame {
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + width as usize, y0 + height as usize);
        let view = self.as_ndarray();
        let data: Vec<u8> = view.slice(s![y0..y1, x0..x1, ..]).iter().copied().collect();
        Frame::new(data, width, height, self.channels, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_filled_repeats_pixel() {
        let frame = Frame::filled(3, 2, [10, 20, 30], 1);
        assert_eq!(frame.data().len(), 18);
        assert_eq!(&frame.data()[..6], &[10, 20, 30, 10, 20, 30]);
        assert_eq!(frame.index(), 1);
    }

    #[test]
    fn test_with_index_overrides_index() {
        let frame = Frame::filled(1, 1, [0, 0, 0], 0).with_index(7);
        assert_eq!(frame.index(), 7);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_sub_frame_copies_rectangle() {
        // 3x3 frame, red channel = row * 3 + col
        let mut data = vec![0u8; 27];
        for row in 0..3 {
            for col in 0..3 {
                data[(row * 3 + col) * 3] = (row * 3 + col) as u8;
            }
        }
        let frame = Frame::new(data, 3, 3, 3, 4);

        let sub = frame.sub_frame(1, 1, 2, 2);

        assert_eq!(sub.width(), 2);
        assert_eq!(sub.height(), 2);
        assert_eq!(sub.index(), 4);
        let arr = sub.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 4);
        assert_eq!(arr[[0, 1, 0]], 5);
        assert_eq!(arr[[1, 0, 0]], 7);
        assert_eq!(arr[[1, 1, 0]], 8);
    }

    #[test]
    fn test_sub_frame_empty() {
        let frame = Frame::filled(4, 4, [1, 2, 3], 0);
        let sub = frame.sub_frame(2, 2, 0, 0);
        assert!(sub.data().is_empty());
    }
}
