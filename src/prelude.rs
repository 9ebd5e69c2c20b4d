//! Prelude module for common globelet types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use globelet::prelude::*;`

pub use crate::core::{
    camera::{CameraState, CameraSurface, CameraTransition},
    config::{
        AccessToken, EngineConfig, EngineProfile, FadeConfig, SpinConfig, SurfaceConfig,
        VisibilityConfig,
    },
    geo::LatLng,
    headless::HeadlessCamera,
};

pub use crate::animation::easing::EasingType;

pub use crate::data::launch::{load_launches, parse_launches, Launch};

pub use crate::engine::{
    diagnostics::{Diagnostic, DiagnosticSink},
    rotation::{IdleRotationController, SpinState},
    router::GlobeEngine,
};

pub use crate::input::events::{CameraEvent, CameraEventKind, ListenerId};

pub use crate::layers::{
    manager::MarkerSet,
    marker::{Marker, MarkerHandle},
};

pub use crate::spatial::{
    updater::{MarkerVisibilityUpdater, VisibilitySummary},
    visibility::{ThresholdModel, Visibility, VisibilityClassifier},
};

pub use crate::{Error as GlobeError, Result};

pub use std::{collections::VecDeque, time::Duration};

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
