use crate::{
    core::{camera::CameraState, config::FadeConfig},
    engine::diagnostics::{Diagnostic, DiagnosticSink},
    layers::marker::MarkerHandle,
    spatial::visibility::{Visibility, VisibilityClassifier},
};

/// Counts from one visibility pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilitySummary {
    pub visible: usize,
    pub hidden: usize,
    /// Markers with unusable coordinates, hidden and reported
    pub skipped: usize,
    /// Markers whose opacity or interactivity actually changed
    pub changed: usize,
}

impl VisibilitySummary {
    pub fn total(&self) -> usize {
        self.visible + self.hidden + self.skipped
    }
}

/// Applies classifier results to marker handles
///
/// A pass touches only markers whose state differs from the classification,
/// so repeating it with the same camera leaves every marker (and any running
/// fade) alone.
#[derive(Debug, Clone, Default)]
pub struct MarkerVisibilityUpdater {
    classifier: VisibilityClassifier,
    fade: FadeConfig,
    diagnostics: DiagnosticSink,
}

impl MarkerVisibilityUpdater {
    pub fn new(classifier: VisibilityClassifier, fade: FadeConfig) -> Self {
        Self {
            classifier,
            fade,
            diagnostics: DiagnosticSink::disabled(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn classifier(&self) -> &VisibilityClassifier {
        &self.classifier
    }

    /// Classify every marker against one camera snapshot and update its handle
    pub fn update<'a, M, I>(&self, camera: &CameraState, markers: I) -> VisibilitySummary
    where
        M: MarkerHandle + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut M>,
    {
        let mut summary = VisibilitySummary::default();

        if !camera.is_valid() {
            self.diagnostics.report(Diagnostic::InvalidCameraState {
                center: camera.center,
                zoom: camera.zoom,
            });
            return summary;
        }

        for marker in markers {
            let position = marker.position();
            let visibility = if position.is_valid() {
                self.classifier.classify(camera, &position)
            } else {
                summary.skipped += 1;
                self.diagnostics.report(Diagnostic::InvalidMarkerCoordinate {
                    marker_id: marker.id().to_string(),
                    position,
                });
                Visibility::Hidden
            };

            if position.is_valid() {
                match visibility {
                    Visibility::Visible => summary.visible += 1,
                    Visibility::Hidden => summary.hidden += 1,
                }
            }

            if self.apply(marker, visibility) {
                summary.changed += 1;
            }
        }

        log::trace!(
            "visibility pass: {} visible, {} hidden, {} skipped, {} changed",
            summary.visible,
            summary.hidden,
            summary.skipped,
            summary.changed
        );
        summary
    }

    /// Returns true if the handle was modified
    fn apply<M: MarkerHandle + ?Sized>(&self, marker: &mut M, visibility: Visibility) -> bool {
        let mut changed = false;

        let opacity = visibility.opacity();
        if marker.opacity() != opacity {
            marker.set_opacity(opacity, &self.fade);
            changed = true;
        }

        let interactive = visibility.is_visible();
        if marker.is_interactive() != interactive {
            marker.set_interactive(interactive);
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        layers::marker::{Marker, MarkerElement},
    };

    /// Handle that counts how often it is written to
    struct CountingHandle {
        id: String,
        position: LatLng,
        element: MarkerElement,
        opacity: f32,
        interactive: bool,
        writes: usize,
    }

    impl CountingHandle {
        fn new(id: &str, lat: f64, lng: f64) -> Self {
            Self {
                id: id.to_string(),
                position: LatLng::new(lat, lng),
                element: MarkerElement::default(),
                opacity: 1.0,
                interactive: true,
                writes: 0,
            }
        }
    }

    impl MarkerHandle for CountingHandle {
        fn id(&self) -> &str {
            &self.id
        }
        fn position(&self) -> LatLng {
            self.position
        }
        fn element(&self) -> &MarkerElement {
            &self.element
        }
        fn opacity(&self) -> f32 {
            self.opacity
        }
        fn set_opacity(&mut self, opacity: f32, _fade: &FadeConfig) {
            self.opacity = opacity;
            self.writes += 1;
        }
        fn is_interactive(&self) -> bool {
            self.interactive
        }
        fn set_interactive(&mut self, interactive: bool) {
            self.interactive = interactive;
            self.writes += 1;
        }
    }

    fn camera() -> CameraState {
        CameraState::new(LatLng::new(0.0, 0.0), 2.0)
    }

    #[test]
    fn test_hidden_markers_fade_out_and_ignore_clicks() {
        let updater = MarkerVisibilityUpdater::default();
        let mut markers = vec![
            Marker::new("near".to_string(), LatLng::new(10.0, 10.0)),
            Marker::new("far".to_string(), LatLng::new(0.0, 180.0)),
        ];

        let summary = updater.update(&camera(), markers.iter_mut());
        assert_eq!(summary.visible, 1);
        assert_eq!(summary.hidden, 1);
        assert_eq!(summary.changed, 1);

        assert_eq!(markers[0].opacity(), 1.0);
        assert!(markers[0].is_interactive());
        assert_eq!(markers[1].opacity(), 0.0);
        assert!(!markers[1].is_interactive());
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let updater = MarkerVisibilityUpdater::default();
        let mut markers = vec![
            CountingHandle::new("a", 0.0, 170.0),
            CountingHandle::new("b", 5.0, 5.0),
        ];

        updater.update(&camera(), markers.iter_mut());
        let writes: Vec<_> = markers.iter().map(|m| m.writes).collect();
        assert_eq!(writes, vec![2, 0]);

        let summary = updater.update(&camera(), markers.iter_mut());
        assert_eq!(summary.changed, 0);
        assert_eq!(markers.iter().map(|m| m.writes).collect::<Vec<_>>(), writes);
    }

    #[test]
    fn test_order_independent() {
        let updater = MarkerVisibilityUpdater::default();
        let coords = [
            ("a", 0.0, 10.0),
            ("b", 40.0, 100.0),
            ("c", -60.0, -30.0),
            ("d", 0.0, -179.0),
            ("e", 75.0, 0.0),
        ];

        let mut forward: Vec<_> = coords
            .iter()
            .map(|(id, lat, lng)| CountingHandle::new(id, *lat, *lng))
            .collect();
        let mut reversed: Vec<_> = coords
            .iter()
            .rev()
            .map(|(id, lat, lng)| CountingHandle::new(id, *lat, *lng))
            .collect();

        updater.update(&camera(), forward.iter_mut());
        updater.update(&camera(), reversed.iter_mut());

        for marker in &forward {
            let twin = reversed.iter().find(|m| m.id == marker.id).unwrap();
            assert_eq!(marker.opacity, twin.opacity, "marker {}", marker.id);
            assert_eq!(marker.interactive, twin.interactive, "marker {}", marker.id);
        }
    }

    #[test]
    fn test_invalid_marker_reported_and_hidden() {
        let (sink, rx) = DiagnosticSink::channel();
        let updater = MarkerVisibilityUpdater::default().with_diagnostics(sink);
        let mut markers = vec![
            CountingHandle::new("bad", f64::NAN, 0.0),
            CountingHandle::new("good", 1.0, 1.0),
        ];

        let summary = updater.update(&camera(), markers.iter_mut());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.visible, 1);
        assert_eq!(summary.total(), 2);
        assert_eq!(markers[0].opacity, 0.0);
        assert!(!markers[0].interactive);
        assert_eq!(markers[1].opacity, 1.0);

        match rx.try_recv().unwrap() {
            Diagnostic::InvalidMarkerCoordinate { marker_id, .. } => assert_eq!(marker_id, "bad"),
            other => panic!("unexpected diagnostic {other:?}"),
        }
    }

    #[test]
    fn test_invalid_camera_leaves_markers_alone() {
        let (sink, rx) = DiagnosticSink::channel();
        let updater = MarkerVisibilityUpdater::default().with_diagnostics(sink);
        let mut markers = vec![CountingHandle::new("a", 0.0, 170.0)];

        let mut broken = camera();
        broken.zoom = f64::NAN;
        let summary = updater.update(&broken, markers.iter_mut());

        assert_eq!(summary, VisibilitySummary::default());
        assert_eq!(markers[0].writes, 0);
        assert!(matches!(
            rx.try_recv().unwrap(),
            Diagnostic::InvalidCameraState { .. }
        ));
    }

    #[test]
    fn test_boxed_handles() {
        let updater = MarkerVisibilityUpdater::default();
        let mut markers: Vec<Box<dyn MarkerHandle>> = vec![
            Box::new(Marker::new("m".to_string(), LatLng::new(0.0, 175.0))),
            Box::new(CountingHandle::new("c", 0.0, 0.0)),
        ];

        let summary = updater.update(&camera(), markers.iter_mut().map(|m| m.as_mut()));
        assert_eq!(summary.hidden, 1);
        assert_eq!(summary.visible, 1);
        assert_eq!(markers[0].opacity(), 0.0);
    }
}
