pub mod marker;
pub mod marker_style;
