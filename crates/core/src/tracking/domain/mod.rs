pub mod coordinate_translator;
pub mod marker;
pub mod marker_assigner;
