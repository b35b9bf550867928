pub mod color;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
