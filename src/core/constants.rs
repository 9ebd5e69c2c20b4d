//! Engine-wide defaults for idle spin, marker visibility and the initial globe view.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Seconds the globe takes for one full idle revolution.
pub const REVOLUTION_PERIOD_SECS: f64 = 240.0;

/// At or above this zoom the idle spin is disabled entirely.
pub const MAX_SPIN_ZOOM: f64 = 5.0;

/// Above this zoom the spin speed is damped linearly towards zero.
pub const SLOW_SPIN_ZOOM: f64 = 3.0;

/// Duration of one spin step (one eased camera transition).
pub const SPIN_TICK_MS: u64 = 1000;

/// How many degrees the visibility cone shrinks per zoom level.
pub const VISIBILITY_DEGREES_PER_ZOOM: f64 = 5.0;

/// The visibility cone never shrinks below this half-angle.
pub const VISIBILITY_FLOOR_DEGREES: f64 = 30.0;

/// Half-angle of the near hemisphere.
pub const HEMISPHERE_DEGREES: f64 = 90.0;

/// Slack applied to angular comparisons so that values landing on a boundary
/// are not flipped by floating point noise.
pub const ANGLE_EPSILON_DEGREES: f64 = 1e-9;

/// Marker opacity fade duration.
pub const MARKER_FADE_MS: u64 = 300;

/// Zoom level used when focusing a single launch.
pub const FLY_TO_ZOOM: f64 = 5.0;

/// Duration of the focus flight.
pub const FLY_TO_DURATION_MS: u64 = 2000;

/// Initial globe view: center longitude, latitude.
pub const INITIAL_CENTER: (f64, f64) = (0.0, 20.0);

pub const INITIAL_ZOOM: f64 = 1.5;

pub const INITIAL_PITCH: f64 = 45.0;

/// Satellite imagery style used by the surface unless configured otherwise.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/satellite-v9";

/// Environment variable the access token is resolved from at startup.
pub const ACCESS_TOKEN_ENV: &str = "GLOBELET_ACCESS_TOKEN";

/// Launch marker icon size in pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (32, 32);
