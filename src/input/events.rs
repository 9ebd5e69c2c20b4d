use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Events emitted by a camera surface that the engine listens to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CameraEvent {
    /// The surface finished initialising and can be read and animated
    Load,
    /// Mouse button pressed on the globe
    PointerDown,
    /// Mouse button released
    PointerUp,
    /// Start of a user drag
    DragStart,
    /// Last finger lifted
    TouchEnd,
    /// Camera center changed (user or animation)
    Move { center: LatLng },
    /// Camera movement settled; also fired when a transition completes or is interrupted
    MoveEnd { center: LatLng },
    /// Camera bearing changed
    Rotate { bearing: f64 },
    /// Camera pitch changed
    PitchChange { pitch: f64 },
    /// Camera zoom changed
    ZoomChange { zoom: f64 },
}

/// Discriminant of a [`CameraEvent`], used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraEventKind {
    Load,
    PointerDown,
    PointerUp,
    DragStart,
    TouchEnd,
    Move,
    MoveEnd,
    Rotate,
    PitchChange,
    ZoomChange,
}

impl CameraEventKind {
    /// Every event kind the engine subscribes to when attaching
    pub const ALL: [CameraEventKind; 10] = [
        CameraEventKind::Load,
        CameraEventKind::PointerDown,
        CameraEventKind::PointerUp,
        CameraEventKind::DragStart,
        CameraEventKind::TouchEnd,
        CameraEventKind::Move,
        CameraEventKind::MoveEnd,
        CameraEventKind::Rotate,
        CameraEventKind::PitchChange,
        CameraEventKind::ZoomChange,
    ];

    /// Name as used by web map surfaces
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraEventKind::Load => "load",
            CameraEventKind::PointerDown => "mousedown",
            CameraEventKind::PointerUp => "mouseup",
            CameraEventKind::DragStart => "dragstart",
            CameraEventKind::TouchEnd => "touchend",
            CameraEventKind::Move => "move",
            CameraEventKind::MoveEnd => "moveend",
            CameraEventKind::Rotate => "rotate",
            CameraEventKind::PitchChange => "pitch",
            CameraEventKind::ZoomChange => "zoom",
        }
    }
}

impl std::fmt::Display for CameraEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CameraEvent {
    pub fn kind(&self) -> CameraEventKind {
        match self {
            CameraEvent::Load => CameraEventKind::Load,
            CameraEvent::PointerDown => CameraEventKind::PointerDown,
            CameraEvent::PointerUp => CameraEventKind::PointerUp,
            CameraEvent::DragStart => CameraEventKind::DragStart,
            CameraEvent::TouchEnd => CameraEventKind::TouchEnd,
            CameraEvent::Move { .. } => CameraEventKind::Move,
            CameraEvent::MoveEnd { .. } => CameraEventKind::MoveEnd,
            CameraEvent::Rotate { .. } => CameraEventKind::Rotate,
            CameraEvent::PitchChange { .. } => CameraEventKind::PitchChange,
            CameraEvent::ZoomChange { .. } => CameraEventKind::ZoomChange,
        }
    }

    /// A human starts manipulating the camera
    pub fn is_interaction_start(&self) -> bool {
        matches!(self, CameraEvent::PointerDown | CameraEvent::DragStart)
    }

    /// A human lets go of the camera
    pub fn is_interaction_end(&self) -> bool {
        matches!(self, CameraEvent::PointerUp | CameraEvent::TouchEnd)
    }

    /// The framing changed, so marker visibility must be recomputed
    pub fn changes_framing(&self) -> bool {
        matches!(
            self,
            CameraEvent::Move { .. }
                | CameraEvent::MoveEnd { .. }
                | CameraEvent::Rotate { .. }
                | CameraEvent::PitchChange { .. }
                | CameraEvent::ZoomChange { .. }
        )
    }
}

/// Handle returned by a subscription, used to unsubscribe that listener alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_mapping() {
        let center = LatLng::new(0.0, 0.0);
        assert_eq!(CameraEvent::PointerDown.kind(), CameraEventKind::PointerDown);
        assert_eq!(CameraEvent::MoveEnd { center }.kind(), CameraEventKind::MoveEnd);
        assert_eq!(
            CameraEvent::ZoomChange { zoom: 2.0 }.kind(),
            CameraEventKind::ZoomChange
        );
    }

    #[test]
    fn test_event_classification() {
        assert!(CameraEvent::PointerDown.is_interaction_start());
        assert!(CameraEvent::DragStart.is_interaction_start());
        assert!(!CameraEvent::PointerUp.is_interaction_start());

        assert!(CameraEvent::PointerUp.is_interaction_end());
        assert!(CameraEvent::TouchEnd.is_interaction_end());

        assert!(CameraEvent::Rotate { bearing: 10.0 }.changes_framing());
        assert!(CameraEvent::PitchChange { pitch: 10.0 }.changes_framing());
        assert!(!CameraEvent::Load.changes_framing());
        assert!(!CameraEvent::PointerDown.changes_framing());
    }

    #[test]
    fn test_all_kinds_are_distinct() {
        let names: std::collections::HashSet<_> =
            CameraEventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), CameraEventKind::ALL.len());
        assert_eq!(CameraEventKind::MoveEnd.to_string(), "moveend");
    }
}
