use geo::HaversineDistance;
use serde::{Deserialize, Serialize};

/// Latitudes closer to a pole than this are treated as the pole itself.
const POLE_EPSILON: f64 = 1e-9;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Whether this point sits on (or numerically at) one of the poles
    pub fn is_pole(&self) -> bool {
        90.0 - self.lat.abs() <= POLE_EPSILON
    }

    /// The point on the opposite side of the sphere
    pub fn antipode(&self) -> LatLng {
        LatLng::new(-self.lat, Self::wrap_lng(self.lng + 180.0))
    }

    /// Great-circle central angle to another point in degrees, via the haversine formula
    pub fn central_angle_to(&self, other: &LatLng) -> f64 {
        central_angle(self, other)
    }

    /// Initial great-circle bearing towards another point, in [0, 360)
    ///
    /// Returns `None` when the bearing is undefined: this point sits on a
    /// pole or both points coincide. Heading towards a pole is fine.
    pub fn bearing_to(&self, other: &LatLng) -> Option<f64> {
        initial_bearing(self, other)
    }

    /// Ground distance in meters to another LatLng on the mean-radius sphere
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        self.to_point().haversine_distance(&other.to_point())
    }

    pub fn to_point(&self) -> geo_types::Point<f64> {
        geo_types::Point::new(self.lng, self.lat)
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        LatLng::new(coord.y, coord.x)
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::coord! { x: lat_lng.lng, y: lat_lng.lat }
    }
}

/// Haversine central angle between two points, in degrees within [0, 180].
pub fn central_angle(from: &LatLng, to: &LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    c.to_degrees()
}

/// Initial bearing from one point towards another, in [0, 360).
///
/// A pole target resolves to due north or due south; only a pole origin has
/// no heading.
pub fn initial_bearing(from: &LatLng, to: &LatLng) -> Option<f64> {
    if from.is_pole() || central_angle(from, to) == 0.0 {
        return None;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let x = delta_lng.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    Some(normalize_degrees(x.atan2(y).to_degrees()))
}

/// Folds any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two angles, in [0, 180].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(a - b);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
