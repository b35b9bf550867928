/// Fraction of the face box added on each side before classification.
pub const CLASSIFICATION_CROP_PADDING: f64 = 0.05;

/// Classifications below this confidence leave the marker neutral.
pub const CLASSIFICATION_CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Label the gender oracle reports for male faces.
pub const MALE_LABEL: &str = "Male";

/// Bounded queue depth between the session and each oracle worker.
pub const ORACLE_CHANNEL_CAPACITY: usize = 8;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
