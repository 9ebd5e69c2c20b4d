//! Idle spin: slowly rotate the globe while nobody touches it.
//!
//! Each tick is a single eased camera transition covering one tick interval.
//! The next tick is only requested once the surface reports the previous one
//! settled, so spin commands never overlap.

use crate::core::{
    camera::{CameraSurface, CameraTransition},
    config::SpinConfig,
    geo::LatLng,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    /// Free to issue spin ticks
    Spinning,
    /// A human is manipulating the camera
    Suspended,
}

#[derive(Debug, Clone)]
pub struct IdleRotationController {
    config: SpinConfig,
    state: SpinState,
    /// A transition we requested (spin or flight) has not settled yet
    in_flight: bool,
}

impl IdleRotationController {
    pub fn new(config: SpinConfig) -> Self {
        Self {
            config,
            state: SpinState::Spinning,
            in_flight: false,
        }
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled != enabled {
            log::debug!("idle spin {}", if enabled { "enabled" } else { "disabled" });
        }
        self.config.enabled = enabled;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Spin may be issued only while enabled and nobody is interacting
    pub fn can_spin(&self) -> bool {
        self.config.enabled && self.state == SpinState::Spinning
    }

    /// Degrees of longitude one tick covers at the given zoom
    pub fn spin_delta(&self, zoom: f64) -> f64 {
        let max = self.config.max_spin_zoom;
        let slow = self.config.slow_spin_zoom;
        if !zoom.is_finite() || zoom >= max {
            return 0.0;
        }

        let mut degrees_per_second = self.config.base_degrees_per_second();
        if zoom > slow {
            degrees_per_second *= (max - zoom) / (max - slow);
        }

        degrees_per_second * self.config.tick_duration().as_secs_f64()
    }

    /// Center the next tick should ease to, or `None` if the zoom disables spin
    pub fn next_center(&self, center: LatLng, zoom: f64) -> Option<LatLng> {
        let delta = self.spin_delta(zoom);
        if delta <= 0.0 {
            return None;
        }
        Some(LatLng::new(center.lat, LatLng::wrap_lng(center.lng - delta)))
    }

    /// pointer-down or drag-start
    pub fn interaction_started(&mut self) {
        if self.state != SpinState::Suspended {
            log::debug!("idle spin suspended");
        }
        self.state = SpinState::Suspended;
    }

    /// pointer-up or touch-end
    pub fn interaction_ended(&mut self) {
        if self.state != SpinState::Spinning {
            log::debug!("idle spin resumed");
        }
        self.state = SpinState::Spinning;
    }

    /// The surface reported move-end
    pub fn transition_settled(&mut self) {
        self.in_flight = false;
    }

    /// Someone else started a transition we should wait for
    pub fn transition_started(&mut self) {
        self.in_flight = true;
    }

    /// Forget any pending tick (teardown)
    pub fn cancel(&mut self) {
        self.in_flight = false;
    }

    /// Issue one spin step if allowed
    ///
    /// Returns the transition that was sent to the camera. Nothing is issued
    /// while suspended, disabled, zoomed in past the spin limit, or while a
    /// previous transition is still running.
    pub fn tick<C>(&mut self, camera: &mut C) -> Option<CameraTransition>
    where
        C: CameraSurface + ?Sized,
    {
        if !self.can_spin() || self.in_flight {
            return None;
        }

        let zoom = camera.zoom();
        let center = self.next_center(camera.center(), zoom)?;
        let transition =
            CameraTransition::ease_to(center, self.config.tick_duration(), self.config.easing);

        log::trace!(
            "spin tick: zoom {:.2}, lng {:.3} -> {:.3}",
            zoom,
            camera.center().lng,
            center.lng
        );
        camera.animate_to(transition.clone());
        self.in_flight = true;
        Some(transition)
    }
}

impl Default for IdleRotationController {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}
