pub mod bounding_box;
pub mod channels;
pub mod grid;

pub use bounding_box::BoundingBox;
pub use channels::RgbChannels;
pub use grid::{FloatGrid, GrayGrid, Grid, LabelGrid};
