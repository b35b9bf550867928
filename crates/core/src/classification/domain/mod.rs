pub mod classification_crop;
pub mod gender_classifier;
pub mod gender_color;
