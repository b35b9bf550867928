pub mod capture;
pub mod classification;
pub mod detection;
pub mod pipeline;
pub mod presentation;
pub mod shared;
pub mod tracking;
