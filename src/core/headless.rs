//! In-memory camera surface for headless use: tests, servers and CLI tools.
//!
//! Time only moves when [`HeadlessCamera::advance`] is called, and events are
//! delivered to subscribers at the end of each state change. Every requested
//! transition is recorded so callers can assert on what was asked for.

use crate::{
    animation::easing::{interpolate_center, lerp},
    core::{
        camera::{CameraState, CameraSurface, CameraTransition},
        config::SurfaceConfig,
        geo::{normalize_degrees, LatLng},
    },
    input::{
        events::{CameraEvent, CameraEventKind, ListenerId},
        listeners::ListenerRegistry,
    },
    prelude::Duration,
};
use crossbeam_channel::Sender;

#[derive(Debug, Clone)]
struct ActiveTransition {
    transition: CameraTransition,
    from_center: LatLng,
    from_zoom: f64,
    elapsed: Duration,
}

pub struct HeadlessCamera {
    state: CameraState,
    ready: bool,
    registry: ListenerRegistry,
    active: Option<ActiveTransition>,
    issued: Vec<CameraTransition>,
}

impl HeadlessCamera {
    /// A camera that still has to [`load`](Self::load)
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            ready: false,
            registry: ListenerRegistry::new(),
            active: None,
            issued: Vec::new(),
        }
    }

    /// Initial framing from a surface configuration
    pub fn from_config(config: &SurfaceConfig) -> Self {
        log::debug!("headless surface using style {}", config.style_url);
        let state = CameraState::new(config.initial_center, config.initial_zoom)
            .with_pitch(config.initial_pitch);
        Self::new(state)
    }

    /// Mark the camera as already loaded, without emitting `Load`
    pub fn loaded(mut self) -> Self {
        self.ready = true;
        self
    }

    /// Finish initialising and announce it
    pub fn load(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.fire(CameraEvent::Load);
    }

    /// Queue and deliver a single event
    pub fn fire(&mut self, event: CameraEvent) {
        self.registry.emit(event);
        self.registry.dispatch();
    }

    /// Let time pass, progressing the running transition
    pub fn advance(&mut self, dt: Duration) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        active.elapsed += dt;
        let duration = active.transition.duration;
        let t = if duration.is_zero() {
            1.0
        } else {
            (active.elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };
        let eased = active.transition.easing.apply(t);

        let center = interpolate_center(&active.from_center, &active.transition.center, eased);
        let zoom = active
            .transition
            .zoom
            .map(|target| lerp(active.from_zoom, target, eased));
        let finished = t >= 1.0;

        self.state.center = if finished {
            active.transition.center
        } else {
            center
        };
        self.registry.emit(CameraEvent::Move {
            center: self.state.center,
        });

        if let Some(zoom) = zoom {
            self.state.zoom = zoom.max(0.0);
            self.registry.emit(CameraEvent::ZoomChange {
                zoom: self.state.zoom,
            });
        }

        if finished {
            self.active = None;
            self.registry.emit(CameraEvent::MoveEnd {
                center: self.state.center,
            });
        }

        self.registry.dispatch();
    }

    /// Run the current transition to completion
    pub fn settle(&mut self) {
        if let Some(active) = &self.active {
            let remaining = active.transition.duration.saturating_sub(active.elapsed);
            self.advance(remaining);
        }
    }

    /// Abort the running transition the way user input does
    fn interrupt(&mut self) {
        if self.active.take().is_some() {
            self.registry.emit(CameraEvent::MoveEnd {
                center: self.state.center,
            });
        }
    }

    pub fn pointer_down(&mut self) {
        self.registry.emit(CameraEvent::PointerDown);
        self.interrupt();
        self.registry.dispatch();
    }

    pub fn drag_start(&mut self) {
        self.registry.emit(CameraEvent::DragStart);
        self.interrupt();
        self.registry.dispatch();
    }

    pub fn pointer_up(&mut self) {
        self.fire(CameraEvent::PointerUp);
    }

    pub fn touch_end(&mut self) {
        self.fire(CameraEvent::TouchEnd);
    }

    /// User drag: move the center without a transition
    pub fn drag_to(&mut self, center: LatLng) {
        self.state.center = center;
        self.fire(CameraEvent::Move { center });
    }

    /// User drag finished moving the camera
    pub fn drag_end(&mut self) {
        self.fire(CameraEvent::MoveEnd {
            center: self.state.center,
        });
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = zoom.max(0.0);
        self.fire(CameraEvent::ZoomChange {
            zoom: self.state.zoom,
        });
    }

    pub fn set_bearing(&mut self, bearing: f64) {
        self.state.bearing = normalize_degrees(bearing);
        self.fire(CameraEvent::Rotate {
            bearing: self.state.bearing,
        });
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.state.pitch = pitch.clamp(0.0, 90.0);
        self.fire(CameraEvent::PitchChange {
            pitch: self.state.pitch,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Every transition requested so far, oldest first
    pub fn issued(&self) -> &[CameraTransition] {
        &self.issued
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listener_count()
    }
}

impl CameraSurface for HeadlessCamera {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn center(&self) -> LatLng {
        self.state.center
    }

    fn zoom(&self) -> f64 {
        self.state.zoom
    }

    fn bearing(&self) -> f64 {
        self.state.bearing
    }

    fn pitch(&self) -> f64 {
        self.state.pitch
    }

    fn animate_to(&mut self, transition: CameraTransition) {
        if !self.ready {
            log::warn!("transition requested before the camera loaded; ignored");
            return;
        }
        // a newer request replaces the running one without a move-end
        self.active = Some(ActiveTransition {
            from_center: self.state.center,
            from_zoom: self.state.zoom,
            elapsed: Duration::ZERO,
            transition: transition.clone(),
        });
        self.issued.push(transition);
    }

    fn subscribe(&mut self, kind: CameraEventKind, sender: Sender<CameraEvent>) -> ListenerId {
        self.registry.on(kind, sender)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.registry.off(id)
    }
}
