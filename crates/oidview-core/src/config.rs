//! Camera navigation configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::ModifierKey;

/// Default zoom base: one scroll tick scales the view by 10%.
const DEFAULT_ZOOM_FACTOR: f32 = 1.1;
/// Default keyboard pan step, in buffer-local units.
const DEFAULT_PAN_STEP: f32 = 1.0;

/// Tunables owned by each [`Camera`](crate::Camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Base of the exponential zoom; must be greater than one.
    pub zoom_factor: f32,
    /// Distance moved per held arrow key per update.
    pub pan_step: f32,
    /// Modifier that must be held for keyboard zoom and pan.
    pub navigation_modifier: ModifierKey,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            pan_step: DEFAULT_PAN_STEP,
            navigation_modifier: ModifierKey::Control,
        }
    }
}

impl CameraConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `OIDVIEW_ZOOM_FACTOR` / `OIDVIEW_PAN_STEP`.
    ///
    /// Unparseable or out-of-range overrides are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// [`from_env`](Self::from_env) with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(factor) = parse_f32(&lookup, "OIDVIEW_ZOOM_FACTOR") {
            config.zoom_factor = factor;
        }
        if let Some(step) = parse_f32(&lookup, "OIDVIEW_PAN_STEP") {
            config.pan_step = step;
        }

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("ignoring camera overrides from environment: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(ConfigError::Invalid("zoom_factor must be a finite value above 1"));
        }
        if !self.pan_step.is_finite() || self.pan_step <= 0.0 {
            return Err(ConfigError::Invalid("pan_step must be a finite positive value"));
        }
        Ok(())
    }
}

fn parse_f32(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<f32> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("{name}={raw} is not a number, keeping the default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = CameraConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zoom_factor, 1.1);
        assert_eq!(config.navigation_modifier, ModifierKey::Control);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = CameraConfig::from_json(r#"{ "zoom_factor": 2.0 }"#).unwrap();
        assert_eq!(config.zoom_factor, 2.0);
        assert_eq!(config.pan_step, 1.0);
    }

    #[test]
    fn modifier_parses_from_json() {
        let config = CameraConfig::from_json(r#"{ "navigation_modifier": "Alt" }"#).unwrap();
        assert_eq!(config.navigation_modifier, ModifierKey::Alt);
    }

    #[test]
    fn rejects_non_expanding_zoom_factor() {
        let err = CameraConfig::from_json(r#"{ "zoom_factor": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_pan_step() {
        let err = CameraConfig::from_json(r#"{ "pan_step": -3.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CameraConfig::from_json("{ zoom_factor: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn env_without_overrides_is_default() {
        assert_eq!(CameraConfig::from_lookup(vars(&[])), CameraConfig::default());
    }

    #[test]
    fn env_overrides_apply() {
        let config = CameraConfig::from_lookup(vars(&[
            ("OIDVIEW_ZOOM_FACTOR", "1.5"),
            ("OIDVIEW_PAN_STEP", " 8 "),
        ]));
        assert_eq!(config.zoom_factor, 1.5);
        assert_eq!(config.pan_step, 8.0);
        assert_eq!(config.navigation_modifier, ModifierKey::Control);
    }

    #[test]
    fn out_of_range_env_override_falls_back_to_defaults() {
        let config = CameraConfig::from_lookup(vars(&[
            ("OIDVIEW_ZOOM_FACTOR", "0.5"),
            ("OIDVIEW_PAN_STEP", "3.0"),
        ]));
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn unparseable_env_override_is_skipped() {
        let config = CameraConfig::from_lookup(vars(&[
            ("OIDVIEW_ZOOM_FACTOR", "fast"),
            ("OIDVIEW_PAN_STEP", "2.5"),
        ]));
        assert_eq!(config.zoom_factor, 1.1);
        assert_eq!(config.pan_step, 2.5);
    }

    #[test]
    fn json_roundtrip_keeps_values() {
        let config = CameraConfig {
            zoom_factor: 1.25,
            pan_step: 4.0,
            navigation_modifier: ModifierKey::Shift,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CameraConfig::from_json(&json).unwrap(), config);
    }
}
