pub mod easing;

pub use easing::{interpolate_center, lerp, EasingType};
