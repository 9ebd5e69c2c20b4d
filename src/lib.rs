//! # Globelet
//!
//! Idle rotation and marker visibility for an interactive 3D globe.
//!
//! The crate drives a camera it does not own: a [`CameraSurface`] reports
//! camera events and accepts eased transitions, and the [`GlobeEngine`]
//! turns those events into a slow idle spin and into visible/hidden states
//! for the markers on the near side of the globe.

pub mod animation;
pub mod core;
pub mod data;
pub mod engine;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod spatial;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::{CameraState, CameraSurface, CameraTransition},
    config::{AccessToken, EngineConfig, EngineProfile, SurfaceConfig},
    geo::LatLng,
    headless::HeadlessCamera,
};

pub use data::launch::Launch;

pub use engine::{
    diagnostics::{Diagnostic, DiagnosticSink},
    rotation::{IdleRotationController, SpinState},
    router::GlobeEngine,
};

pub use input::events::{CameraEvent, CameraEventKind};

pub use layers::{
    manager::MarkerSet,
    marker::{Marker, MarkerHandle},
};

pub use spatial::{
    updater::{MarkerVisibilityUpdater, VisibilitySummary},
    visibility::{ThresholdModel, Visibility, VisibilityClassifier},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, GlobeError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No access token for the map surface; set {}", constants::ACCESS_TOKEN_ENV)]
    MissingAccessToken,
}

/// Error type alias for convenience
pub type Error = GlobeError;
