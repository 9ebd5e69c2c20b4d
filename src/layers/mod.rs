pub mod base;
pub mod manager;
pub mod marker;

pub use manager::MarkerSet;
pub use marker::{Marker, MarkerElement, MarkerHandle};
