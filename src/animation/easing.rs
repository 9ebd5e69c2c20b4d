use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Easing curves understood by camera transitions and marker fades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant velocity; consecutive spin steps compose without stutter
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            // smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Interpolates between two centers, taking the short way around the antimeridian.
pub fn interpolate_center(from: &LatLng, to: &LatLng, t: f64) -> LatLng {
    let mut delta_lng = to.lng - from.lng;
    if delta_lng > 180.0 {
        delta_lng -= 360.0;
    } else if delta_lng < -180.0 {
        delta_lng += 360.0;
    }

    LatLng::new(
        lerp(from.lat, to.lat, t),
        LatLng::wrap_lng(from.lng + delta_lng * t),
    )
}
