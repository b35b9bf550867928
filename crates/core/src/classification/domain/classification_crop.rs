use crate::shared::frame::Frame;
use crate::shared::geometry::NormalizedRect;

/// Rectangle in full-image pixels, origin at the bottom-left like the
/// detector boxes it is derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Face box grown by `padding` (a fraction of the image) on every side,
/// scaled to an image of `image_width` × `image_height` pixels.
///
/// The result may extend past the image.
pub fn crop_rect(
    bbox: &NormalizedRect,
    image_width: u32,
    image_height: u32,
    padding: f64,
) -> PixelRect {
    let w = image_width as f64;
    let h = image_height as f64;
    PixelRect {
        x: w * (bbox.origin_x - padding),
        y: h * (bbox.origin_y - padding),
        width: w * (bbox.width + 2.0 * padding),
        height: h * (bbox.height + 2.0 * padding),
    }
}

/// Whole-pixel window inside an image, in row order (`row` counts from
/// the top).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

/// The padded face region intersected with an image of the given size,
/// snapped to whole pixels and flipped into row order. `None` when nothing
/// of the face lies inside the image.
pub fn crop_window(
    bbox: &NormalizedRect,
    image_width: u32,
    image_height: u32,
    padding: f64,
) -> Option<CropWindow> {
    let rect = crop_rect(bbox, image_width, image_height, padding);
    let fw = image_width as f64;
    let fh = image_height as f64;

    let left = rect.x.max(0.0).round();
    let right = (rect.x + rect.width).min(fw).round();
    let bottom = rect.y.max(0.0).round();
    let top = (rect.y + rect.height).min(fh).round();

    if !(right > left && top > bottom) {
        return None;
    }

    let x = left as u32;
    Some(CropWindow {
        x,
        row: image_height - top as u32,
        width: right as u32 - x,
        height: top as u32 - bottom as u32,
    })
}

/// Cuts the padded face region out of `frame` for classification.
pub fn extract_crop(frame: &Frame, bbox: &NormalizedRect, padding: f64) -> Option<Frame> {
    crop_window(bbox, frame.width(), frame.height(), padding)
        .map(|w| frame.sub_frame(w.x, w.row, w.width, w.height))
}
