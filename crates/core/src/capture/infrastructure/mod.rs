pub mod blank_frame_source;
pub mod image_file_source;
