use crate::core::geo::LatLng;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Non-fatal problems the engine reports instead of failing
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A marker's coordinate is missing, NaN or out of range; it stays hidden
    InvalidMarkerCoordinate { marker_id: String, position: LatLng },
    /// The camera reported a framing the classifier cannot use
    InvalidCameraState { center: LatLng, zoom: f64 },
    /// An operation was requested before the camera finished loading
    CameraNotReady { operation: &'static str },
}

/// Sending half of the diagnostic channel
///
/// Reporting never blocks and never fails: once every receiver is gone the
/// sink silently stops delivering.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    sender: Option<Sender<Diagnostic>>,
}

impl DiagnosticSink {
    /// A sink plus the receiver its reports arrive on
    pub fn channel() -> (Self, Receiver<Diagnostic>) {
        let (tx, rx) = unbounded();
        (Self { sender: Some(tx) }, rx)
    }

    /// A sink that only logs
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic:?}");
        if let Some(sender) = &self.sender {
            let _ = sender.send(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_reaches_receiver() {
        let (sink, rx) = DiagnosticSink::channel();
        sink.report(Diagnostic::CameraNotReady { operation: "tick" });
        assert_eq!(
            rx.try_recv().unwrap(),
            Diagnostic::CameraNotReady { operation: "tick" }
        );
    }

    #[test]
    fn test_report_without_receiver() {
        let (sink, rx) = DiagnosticSink::channel();
        drop(rx);
        sink.report(Diagnostic::CameraNotReady { operation: "tick" });

        DiagnosticSink::disabled().report(Diagnostic::CameraNotReady { operation: "tick" });
    }
}
