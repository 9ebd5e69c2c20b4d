//! Event wiring, idle rotation and diagnostics.

pub mod diagnostics;
pub mod rotation;
pub mod router;

pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use rotation::{IdleRotationController, SpinState};
pub use router::GlobeEngine;
