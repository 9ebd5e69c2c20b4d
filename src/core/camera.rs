//! Camera state snapshots and the contract a map surface must fulfil.
//!
//! The engine never owns camera fields. It reads a [`CameraState`] snapshot
//! per event and asks the surface to animate through [`CameraSurface::animate_to`].

use crate::{
    animation::easing::EasingType,
    core::geo::{normalize_degrees, LatLng},
    input::events::{CameraEvent, CameraEventKind, ListenerId},
    prelude::Duration,
};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Snapshot of the camera framing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    /// Rotation around the vertical axis, degrees in [0, 360)
    pub bearing: f64,
    /// Tilt from straight down, degrees in [0, 90]
    pub pitch: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.max(0.0),
            bearing: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = normalize_degrees(bearing);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch.clamp(0.0, 90.0);
        self
    }

    /// Whether every field is a finite number inside its documented range
    pub fn is_valid(&self) -> bool {
        self.center.is_valid()
            && self.zoom.is_finite()
            && self.zoom >= 0.0
            && self.bearing.is_finite()
            && self.pitch.is_finite()
            && (0.0..=90.0).contains(&self.pitch)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0)
    }
}

/// An eased camera move requested from the surface
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    pub center: LatLng,
    /// Target zoom; `None` keeps the current zoom
    pub zoom: Option<f64>,
    pub duration: Duration,
    pub easing: EasingType,
}

impl CameraTransition {
    /// Pan to a center keeping the current zoom
    pub fn ease_to(center: LatLng, duration: Duration, easing: EasingType) -> Self {
        Self {
            center,
            zoom: None,
            duration,
            easing,
        }
    }

    /// Pan and zoom together
    pub fn fly_to(center: LatLng, zoom: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            center,
            zoom: Some(zoom),
            duration,
            easing,
        }
    }
}

/// The map surface the engine drives
///
/// Implementations deliver events by sending them into the channel passed to
/// [`CameraSurface::subscribe`]; every subscription must be individually
/// removable through [`CameraSurface::unsubscribe`].
pub trait CameraSurface {
    /// False until the surface has finished initialising
    fn is_ready(&self) -> bool;

    fn center(&self) -> LatLng;

    fn zoom(&self) -> f64;

    fn bearing(&self) -> f64;

    fn pitch(&self) -> f64;

    /// Snapshot of all framing fields at once
    fn state(&self) -> CameraState {
        CameraState {
            center: self.center(),
            zoom: self.zoom(),
            bearing: self.bearing(),
            pitch: self.pitch(),
        }
    }

    /// Start an eased transition. Calling this while another transition runs
    /// replaces it; the surface reports completion with a `MoveEnd` event.
    fn animate_to(&mut self, transition: CameraTransition);

    fn subscribe(&mut self, kind: CameraEventKind, sender: Sender<CameraEvent>) -> ListenerId;

    /// Returns false if the listener was not registered
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}
