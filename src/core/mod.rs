pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod headless;

pub use camera::{CameraState, CameraSurface, CameraTransition};
pub use config::{AccessToken, EngineConfig, EngineProfile, SurfaceConfig};
pub use geo::LatLng;
pub use headless::HeadlessCamera;
