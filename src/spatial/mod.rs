pub mod updater;
pub mod visibility;

pub use updater::{MarkerVisibilityUpdater, VisibilitySummary};
pub use visibility::{ThresholdModel, Visibility, VisibilityClassifier};
