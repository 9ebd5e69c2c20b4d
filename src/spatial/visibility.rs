//! Front-facing marker test.
//!
//! A marker is visible when its great-circle central angle from the camera
//! center fits inside a threshold cone. The cone half-angle depends on the
//! [`ThresholdModel`]; the zoom-damped distance form is the default.

use crate::{
    core::{
        camera::CameraState,
        constants::{
            ANGLE_EPSILON_DEGREES, HEMISPHERE_DEGREES, VISIBILITY_DEGREES_PER_ZOOM,
            VISIBILITY_FLOOR_DEGREES,
        },
        config::VisibilityConfig,
        geo::{angular_difference, central_angle, initial_bearing, LatLng},
    },
    GlobeError, Result,
};
use serde::{Deserialize, Serialize};

fn default_degrees_per_zoom() -> f64 {
    VISIBILITY_DEGREES_PER_ZOOM
}

fn default_floor_degrees() -> f64 {
    VISIBILITY_FLOOR_DEGREES
}

/// Threshold formula used to decide whether a marker faces the camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdModel {
    /// `max(90 - zoom * degrees_per_zoom, floor_degrees)`, bearing and pitch ignored
    ZoomDistance {
        #[serde(default = "default_degrees_per_zoom")]
        degrees_per_zoom: f64,
        #[serde(default = "default_floor_degrees")]
        floor_degrees: f64,
    },
    /// `90 + pitch / 2` for markers on the side the camera faces, `90` behind it
    ///
    /// Falls back to the plain hemisphere when the bearing from the center is
    /// undefined (center on a pole).
    PitchBearing,
    /// Plain near hemisphere, `90`
    Hemisphere,
}

impl ThresholdModel {
    pub fn validate(&self) -> Result<()> {
        if let ThresholdModel::ZoomDistance {
            degrees_per_zoom,
            floor_degrees,
        } = self
        {
            if !(degrees_per_zoom.is_finite() && *degrees_per_zoom >= 0.0) {
                return Err(GlobeError::InvalidConfig(format!(
                    "degrees per zoom must be a non-negative number, got {degrees_per_zoom}"
                )));
            }
            // the antipode must always fall outside the cone
            if !(0.0..180.0).contains(floor_degrees) {
                return Err(GlobeError::InvalidConfig(format!(
                    "visibility floor must lie in [0, 180), got {floor_degrees}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ThresholdModel {
    fn default() -> Self {
        ThresholdModel::ZoomDistance {
            degrees_per_zoom: VISIBILITY_DEGREES_PER_ZOOM,
            floor_degrees: VISIBILITY_FLOOR_DEGREES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }

    /// Target opacity for a marker in this state
    pub fn opacity(self) -> f32 {
        match self {
            Visibility::Visible => 1.0,
            Visibility::Hidden => 0.0,
        }
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// Pure classifier; holds only its threshold model
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibilityClassifier {
    model: ThresholdModel,
}

impl VisibilityClassifier {
    pub fn new(model: ThresholdModel) -> Self {
        Self { model }
    }

    pub fn from_config(config: &VisibilityConfig) -> Self {
        Self::new(config.model.clone())
    }

    pub fn model(&self) -> &ThresholdModel {
        &self.model
    }

    /// Cone half-angle in degrees for markers straight ahead of the camera
    pub fn threshold(&self, camera: &CameraState) -> f64 {
        match &self.model {
            ThresholdModel::ZoomDistance {
                degrees_per_zoom,
                floor_degrees,
            } => (HEMISPHERE_DEGREES - camera.zoom * degrees_per_zoom).max(*floor_degrees),
            ThresholdModel::PitchBearing => HEMISPHERE_DEGREES + camera.pitch / 2.0,
            ThresholdModel::Hemisphere => HEMISPHERE_DEGREES,
        }
    }

    /// Classify one marker position against the camera framing
    ///
    /// Positions that are not valid coordinates are always hidden.
    pub fn classify(&self, camera: &CameraState, position: &LatLng) -> Visibility {
        if !position.is_valid() || !camera.center.is_valid() {
            return Visibility::Hidden;
        }

        let theta = central_angle(&camera.center, position);
        let visible = match &self.model {
            ThresholdModel::ZoomDistance { .. } | ThresholdModel::Hemisphere => {
                within(theta, self.threshold(camera))
            }
            ThresholdModel::PitchBearing => {
                if within(theta, HEMISPHERE_DEGREES) {
                    true
                } else {
                    match initial_bearing(&camera.center, position) {
                        Some(bearing) if angular_difference(bearing, camera.bearing) <= 90.0 => {
                            within(theta, self.threshold(camera))
                        }
                        // behind the camera, or the camera sits on a pole
                        _ => false,
                    }
                }
            }
        };

        Visibility::from(visible)
    }

    pub fn is_visible(&self, camera: &CameraState, position: &LatLng) -> bool {
        self.classify(camera, position).is_visible()
    }

    /// Collect the indices of the visible positions
    pub fn visible_indices<'a>(
        &self,
        camera: &CameraState,
        positions: impl Iterator<Item = &'a LatLng>,
    ) -> Vec<usize> {
        positions
            .enumerate()
            .filter_map(|(idx, position)| self.is_visible(camera, position).then_some(idx))
            .collect()
    }
}

fn within(theta: f64, threshold: f64) -> bool {
    theta <= threshold + ANGLE_EPSILON_DEGREES
}
