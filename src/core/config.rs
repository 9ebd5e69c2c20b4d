//! Configuration for the spin controller, the visibility classifier and the
//! camera surface.
//!
//! Behavior can be tuned through presets ([`EngineProfile`]) or a custom
//! [`EngineConfig`], which also deserialises from JSON. Surface credentials are
//! resolved once at startup into a [`SurfaceConfig`] and handed to whatever
//! builds the camera; nothing in the engine reads them from ambient state.

use crate::{
    animation::easing::EasingType,
    core::{constants, geo::LatLng},
    prelude::Duration,
    spatial::visibility::ThresholdModel,
    GlobeError, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineProfile {
    /// Four-minute revolution, zoom-damped visibility cone
    Default,
    /// Slower spin with long fades, for kiosk style displays
    Cinematic,
    /// No idle spin at all; visibility still tracks the camera
    Static,
    Custom(EngineConfig),
}

impl EngineProfile {
    pub fn resolve(&self) -> EngineConfig {
        match self {
            Self::Default => EngineConfig::default(),
            Self::Cinematic => EngineConfig {
                spin: SpinConfig {
                    revolution_period_secs: 360.0,
                    ..SpinConfig::default()
                },
                visibility: VisibilityConfig::default(),
                fade: FadeConfig {
                    duration_ms: 600,
                    easing: EasingType::Smooth,
                },
            },
            Self::Static => EngineConfig {
                spin: SpinConfig {
                    enabled: false,
                    ..SpinConfig::default()
                },
                ..EngineConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub spin: SpinConfig,
    pub visibility: VisibilityConfig,
    pub fade: FadeConfig,
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.spin.validate()?;
        self.visibility.validate()
    }
}

/// Idle rotation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub enabled: bool,
    pub revolution_period_secs: f64,
    pub max_spin_zoom: f64,
    pub slow_spin_zoom: f64,
    pub tick_ms: u64,
    pub easing: EasingType,
}

impl SpinConfig {
    /// Undamped degrees of longitude covered per second
    pub fn base_degrees_per_second(&self) -> f64 {
        360.0 / self.revolution_period_secs
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.revolution_period_secs.is_finite() && self.revolution_period_secs > 0.0) {
            return Err(GlobeError::InvalidConfig(format!(
                "revolution period must be positive, got {}",
                self.revolution_period_secs
            )));
        }
        if !(self.slow_spin_zoom < self.max_spin_zoom) {
            return Err(GlobeError::InvalidConfig(format!(
                "slow spin zoom {} must be below max spin zoom {}",
                self.slow_spin_zoom, self.max_spin_zoom
            )));
        }
        if self.tick_ms == 0 {
            return Err(GlobeError::InvalidConfig(
                "spin tick must last at least one millisecond".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            revolution_period_secs: constants::REVOLUTION_PERIOD_SECS,
            max_spin_zoom: constants::MAX_SPIN_ZOOM,
            slow_spin_zoom: constants::SLOW_SPIN_ZOOM,
            tick_ms: constants::SPIN_TICK_MS,
            easing: EasingType::Linear,
        }
    }
}

/// Which threshold formula the classifier applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    pub model: ThresholdModel,
}

impl VisibilityConfig {
    pub fn validate(&self) -> Result<()> {
        self.model.validate()
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            model: ThresholdModel::default(),
        }
    }
}

/// Marker opacity transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub duration_ms: u64,
    pub easing: EasingType,
}

impl FadeConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_ms: constants::MARKER_FADE_MS,
            easing: EasingType::EaseInOut,
        }
    }
}

/// Credential for the map surface provider
///
/// The value never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(GlobeError::MissingAccessToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve the token from an environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) => Self::new(value),
            Err(_) => Err(GlobeError::MissingAccessToken),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Initial framing and credentials for a camera surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub access_token: AccessToken,
    pub style_url: String,
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub initial_pitch: f64,
}

impl SurfaceConfig {
    pub fn new(access_token: AccessToken) -> Self {
        let (lng, lat) = constants::INITIAL_CENTER;
        Self {
            access_token,
            style_url: constants::DEFAULT_STYLE_URL.to_string(),
            initial_center: LatLng::new(lat, lng),
            initial_zoom: constants::INITIAL_ZOOM,
            initial_pitch: constants::INITIAL_PITCH,
        }
    }

    /// Resolve the token from [`constants::ACCESS_TOKEN_ENV`]
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AccessToken::from_env(constants::ACCESS_TOKEN_ENV)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_presets() {
        let default = EngineProfile::Default.resolve();
        let cinematic = EngineProfile::Cinematic.resolve();
        let fixed = EngineProfile::Static.resolve();

        assert!(default.spin.enabled);
        assert_eq!(default.spin.revolution_period_secs, 240.0);
        assert_eq!(default.fade.duration_ms, 300);

        assert!(cinematic.spin.revolution_period_secs > default.spin.revolution_period_secs);
        assert!(cinematic.fade.duration_ms > default.fade.duration_ms);

        assert!(!fixed.spin.enabled);
        assert_eq!(fixed.visibility, default.visibility);

        for profile in [default, cinematic, fixed] {
            assert!(profile.validate().is_ok());
        }
    }

    #[test]
    fn test_base_speed() {
        let spin = SpinConfig::default();
        assert_eq!(spin.base_degrees_per_second(), 1.5);
        assert_eq!(spin.tick_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn test_json_partial_config() {
        let config =
            EngineConfig::from_json_str(r#"{ "spin": { "revolution_period_secs": 120.0 } }"#)
                .unwrap();
        assert_eq!(config.spin.revolution_period_secs, 120.0);
        assert_eq!(config.spin.max_spin_zoom, 5.0);
        assert_eq!(config.fade, FadeConfig::default());
    }

    #[test]
    fn test_invalid_spin_config() {
        let json = r#"{ "spin": { "slow_spin_zoom": 6.0, "max_spin_zoom": 5.0 } }"#;
        assert!(matches!(
            EngineConfig::from_json_str(json),
            Err(GlobeError::InvalidConfig(_))
        ));

        let spin = SpinConfig {
            revolution_period_secs: 0.0,
            ..SpinConfig::default()
        };
        assert!(spin.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(GlobeError::Serialization(_))
        ));
    }

    #[test]
    fn test_access_token_redacted() {
        let token = AccessToken::new("  pk.secret  ").unwrap();
        assert_eq!(token.expose(), "pk.secret");
        assert!(!format!("{token:?}").contains("secret"));

        assert!(matches!(
            AccessToken::new("   "),
            Err(GlobeError::MissingAccessToken)
        ));
    }

    #[test]
    fn test_surface_defaults() {
        let surface = SurfaceConfig::new(AccessToken::new("pk.test").unwrap());
        assert_eq!(surface.initial_center, LatLng::new(20.0, 0.0));
        assert_eq!(surface.initial_zoom, 1.5);
        assert_eq!(surface.initial_pitch, 45.0);
    }
}
