//! Wires camera events to the spin controller and the visibility updater.
//!
//! The engine subscribes a channel to every camera event kind on attach. The
//! host calls [`GlobeEngine::pump`] from its frame loop to drain that channel;
//! all state changes happen there, on the caller's thread.

use crate::{
    animation::easing::EasingType,
    core::{
        camera::{CameraSurface, CameraTransition},
        config::EngineConfig,
        constants::{FLY_TO_DURATION_MS, FLY_TO_ZOOM},
        geo::LatLng,
    },
    engine::{
        diagnostics::{Diagnostic, DiagnosticSink},
        rotation::{IdleRotationController, SpinState},
    },
    input::events::{CameraEvent, CameraEventKind, ListenerId},
    layers::marker::MarkerHandle,
    prelude::Duration,
    spatial::{
        updater::{MarkerVisibilityUpdater, VisibilitySummary},
        visibility::VisibilityClassifier,
    },
    GlobeError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Idle rotation plus marker visibility for one camera surface
pub struct GlobeEngine {
    config: EngineConfig,
    rotation: IdleRotationController,
    updater: MarkerVisibilityUpdater,
    diagnostics: DiagnosticSink,
    events_tx: Sender<CameraEvent>,
    events_rx: Receiver<CameraEvent>,
    subscriptions: Vec<ListenerId>,
    attached: bool,
    ready: bool,
}

impl GlobeEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let (events_tx, events_rx) = unbounded();
        let diagnostics = DiagnosticSink::disabled();
        let updater = MarkerVisibilityUpdater::new(
            VisibilityClassifier::from_config(&config.visibility),
            config.fade.clone(),
        );

        Ok(Self {
            rotation: IdleRotationController::new(config.spin.clone()),
            updater,
            diagnostics,
            events_tx,
            events_rx,
            subscriptions: Vec::new(),
            attached: false,
            ready: false,
            config,
        })
    }

    /// Route diagnostics (bad coordinates, early calls) to a sink
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
        self.updater = self.updater.with_diagnostics(diagnostics.clone());
        self.diagnostics = diagnostics;
        self
    }

    /// Convenience for `with_diagnostics(DiagnosticSink::channel())`
    pub fn diagnostics_channel(self) -> (Self, Receiver<Diagnostic>) {
        let (sink, rx) = DiagnosticSink::channel();
        (self.with_diagnostics(sink), rx)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rotation(&self) -> &IdleRotationController {
        &self.rotation
    }

    pub fn spin_state(&self) -> SpinState {
        self.rotation.state()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// True once the attached camera has loaded
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Subscribe to the camera and, if it already loaded, start working
    pub fn attach<C, M>(&mut self, camera: &mut C, markers: &mut [M]) -> Result<()>
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        if self.attached {
            return Err(GlobeError::InvalidConfig(
                "engine is already attached to a camera".to_string(),
            ));
        }

        self.subscriptions = CameraEventKind::ALL
            .iter()
            .map(|kind| camera.subscribe(*kind, self.events_tx.clone()))
            .collect();
        self.attached = true;
        log::debug!("attached to camera with {} listeners", self.subscriptions.len());

        if camera.is_ready() {
            self.on_ready(camera, markers);
        }
        Ok(())
    }

    /// Remove every listener and forget pending work
    ///
    /// Events the camera emits afterwards (a trailing move-end from an
    /// interrupted spin, for example) never reach the engine.
    pub fn detach<C>(&mut self, camera: &mut C)
    where
        C: CameraSurface + ?Sized,
    {
        for id in self.subscriptions.drain(..) {
            if !camera.unsubscribe(id) {
                log::debug!("listener {} was already gone", id.value());
            }
        }
        self.rotation.cancel();
        let dropped = self.events_rx.try_iter().count();
        if dropped > 0 {
            log::trace!("dropped {dropped} undelivered camera events on detach");
        }
        self.attached = false;
        self.ready = false;
        log::debug!("detached from camera");
    }

    /// Handle every camera event delivered since the last call
    ///
    /// Returns the number of events handled.
    pub fn pump<C, M>(&mut self, camera: &mut C, markers: &mut [M]) -> usize
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(camera, markers, event);
            handled += 1;
        }
        handled
    }

    /// React to one camera event
    pub fn handle_event<C, M>(&mut self, camera: &mut C, markers: &mut [M], event: CameraEvent)
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        if !self.attached {
            return;
        }
        if !self.ready {
            if event != CameraEvent::Load && !camera.is_ready() {
                return;
            }
            self.on_ready(camera, markers);
            if event == CameraEvent::Load {
                return;
            }
        }

        match event {
            event if event.is_interaction_start() => {
                self.rotation.interaction_started();
            }
            event if event.is_interaction_end() => {
                self.rotation.interaction_ended();
                self.try_spin(camera, markers);
            }
            CameraEvent::MoveEnd { .. } => {
                self.rotation.transition_settled();
                self.refresh(camera, markers);
                self.try_spin(camera, markers);
            }
            event if event.changes_framing() => {
                self.refresh(camera, markers);
            }
            _ => {}
        }
    }

    /// The marker set was rebuilt: classify everything and restart spin
    pub fn markers_changed<C, M>(&mut self, camera: &mut C, markers: &mut [M]) -> VisibilitySummary
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        if !self.ready {
            self.diagnostics.report(Diagnostic::CameraNotReady {
                operation: "markers_changed",
            });
            return VisibilitySummary::default();
        }
        let summary = self.refresh(camera, markers);
        self.try_spin(camera, markers);
        summary
    }

    /// Run one visibility pass against the current camera
    pub fn refresh_visibility<C, M>(&self, camera: &C, markers: &mut [M]) -> VisibilitySummary
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        if !self.ready {
            self.diagnostics.report(Diagnostic::CameraNotReady {
                operation: "refresh_visibility",
            });
            return VisibilitySummary::default();
        }
        self.refresh(camera, markers)
    }

    /// Fly the camera to a marker (a click on a launch)
    ///
    /// Spin waits for the flight to settle before issuing the next tick.
    pub fn fly_to<C>(&mut self, camera: &mut C, target: LatLng) -> Option<CameraTransition>
    where
        C: CameraSurface + ?Sized,
    {
        if !self.ready || !camera.is_ready() {
            self.diagnostics
                .report(Diagnostic::CameraNotReady { operation: "fly_to" });
            return None;
        }
        if !target.is_valid() {
            self.diagnostics.report(Diagnostic::InvalidCameraState {
                center: target,
                zoom: FLY_TO_ZOOM,
            });
            return None;
        }

        let transition = CameraTransition::fly_to(
            target,
            FLY_TO_ZOOM,
            Duration::from_millis(FLY_TO_DURATION_MS),
            EasingType::EaseInOut,
        );
        log::debug!("flying to ({:.3}, {:.3})", target.lat, target.lng);
        camera.animate_to(transition.clone());
        self.rotation.transition_started();
        Some(transition)
    }

    /// Turn idle spin on or off; turning it on kicks off a tick
    pub fn set_spin_enabled<C, M>(&mut self, camera: &mut C, markers: &mut [M], enabled: bool)
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        self.rotation.set_enabled(enabled);
        if enabled && self.ready {
            self.try_spin(camera, markers);
        }
    }

    fn on_ready<C, M>(&mut self, camera: &mut C, markers: &mut [M])
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        self.ready = true;
        log::info!("camera ready; tracking {} markers", markers.len());
        self.refresh(camera, markers);
        self.try_spin(camera, markers);
    }

    fn refresh<C, M>(&self, camera: &C, markers: &mut [M]) -> VisibilitySummary
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        self.updater.update(&camera.state(), markers.iter_mut())
    }

    fn try_spin<C, M>(&mut self, camera: &mut C, markers: &[M]) -> Option<CameraTransition>
    where
        C: CameraSurface + ?Sized,
        M: MarkerHandle,
    {
        // nothing to show off yet
        if markers.is_empty() {
            return None;
        }
        self.rotation.tick(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{camera::CameraState, headless::HeadlessCamera},
        layers::marker::Marker,
    };

    fn engine() -> GlobeEngine {
        GlobeEngine::new(EngineConfig::default()).unwrap()
    }

    fn markers() -> Vec<Marker> {
        vec![
            Marker::new("near".to_string(), LatLng::new(10.0, 10.0)),
            Marker::new("far".to_string(), LatLng::new(0.0, 180.0)),
        ]
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.spin.tick_ms = 0;
        assert!(GlobeEngine::new(config).is_err());
    }

    #[test]
    fn test_attach_to_loaded_camera_starts_work() {
        let mut engine = engine();
        let mut camera =
            HeadlessCamera::new(CameraState::new(LatLng::default(), 2.0)).loaded();
        let mut markers = markers();

        engine.attach(&mut camera, &mut markers).unwrap();
        assert!(engine.is_ready());
        assert_eq!(camera.listener_count(), CameraEventKind::ALL.len());
        assert_eq!(camera.issued().len(), 1);
        assert!(!markers[1].is_interactive());
    }

    #[test]
    fn test_double_attach_is_an_error() {
        let mut engine = engine();
        let mut camera = HeadlessCamera::new(CameraState::default());
        let mut markers = markers();
        engine.attach(&mut camera, &mut markers).unwrap();
        assert!(engine.attach(&mut camera, &mut markers).is_err());
    }

    #[test]
    fn test_events_ignored_before_load() {
        let mut engine = engine();
        let mut camera = HeadlessCamera::new(CameraState::new(LatLng::default(), 2.0));
        let mut markers = markers();
        engine.attach(&mut camera, &mut markers).unwrap();

        camera.pointer_up();
        camera.set_zoom(2.5);
        engine.pump(&mut camera, &mut markers);

        assert!(!engine.is_ready());
        assert!(camera.issued().is_empty());
        assert_eq!(markers[1].opacity(), 1.0);

        camera.load();
        engine.pump(&mut camera, &mut markers);
        assert!(engine.is_ready());
        assert_eq!(camera.issued().len(), 1);
        assert_eq!(markers[1].opacity(), 0.0);
    }

    #[test]
    fn test_first_event_after_silent_load_is_handled() {
        let mut engine = engine();
        let mut camera = HeadlessCamera::new(CameraState::new(LatLng::default(), 2.0));
        let mut markers = markers();
        engine.attach(&mut camera, &mut markers).unwrap();

        // the surface became ready without announcing it
        camera = camera.loaded();
        engine.handle_event(&mut camera, &mut markers, CameraEvent::PointerDown);

        assert!(engine.is_ready());
        assert_eq!(engine.spin_state(), SpinState::Suspended);
        assert_eq!(markers[1].opacity(), 0.0);
    }

    #[test]
    fn test_detach_removes_listeners() {
        let mut engine = engine();
        let mut camera =
            HeadlessCamera::new(CameraState::new(LatLng::default(), 2.0)).loaded();
        let mut markers = markers();
        engine.attach(&mut camera, &mut markers).unwrap();

        engine.detach(&mut camera);
        assert_eq!(camera.listener_count(), 0);
        assert!(!engine.is_attached());
    }

    #[test]
    fn test_set_spin_enabled() {
        let mut config = EngineConfig::default();
        config.spin.enabled = false;
        let mut engine = GlobeEngine::new(config).unwrap();
        let mut camera =
            HeadlessCamera::new(CameraState::new(LatLng::default(), 2.0)).loaded();
        let mut markers = markers();

        engine.attach(&mut camera, &mut markers).unwrap();
        assert!(camera.issued().is_empty());

        engine.set_spin_enabled(&mut camera, &mut markers, true);
        assert_eq!(camera.issued().len(), 1);
    }

    #[test]
    fn test_fly_to_before_ready_reported() {
        let (mut engine, rx) = engine().diagnostics_channel();
        let mut camera = HeadlessCamera::new(CameraState::default());

        assert!(engine.fly_to(&mut camera, LatLng::new(28.5, -80.6)).is_none());
        assert_eq!(
            rx.try_recv().unwrap(),
            Diagnostic::CameraNotReady { operation: "fly_to" }
        );
    }
}
