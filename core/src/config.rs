use std::fmt;

use serde::Deserialize;

include!(concat!(env!("OUT_DIR"), "/widget_defaults.rs"));

/// Tunables for the widget. Defaults come from `widget.toml` at build time;
/// the page may override any subset at runtime with a JSON object.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub redirect_url: String,
    pub redirect_key: String,
    pub redirect_delay_ms: u32,
    /// Pixels past a viewport edge before a drag counts as a forced exit.
    pub exit_threshold: f32,
    /// Acceleration in px/s² at full tilt.
    pub gravity_scale: f32,
    pub max_tilt_deg: f32,
    /// Per-frame velocity retention at 60 fps.
    pub friction: f32,
    pub max_dt_ms: f64,
    pub shake_threshold: f64,
    pub shake_cooldown_ms: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            redirect_key: DEFAULT_REDIRECT_KEY.to_string(),
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            exit_threshold: DEFAULT_EXIT_THRESHOLD,
            gravity_scale: DEFAULT_GRAVITY_SCALE,
            max_tilt_deg: DEFAULT_MAX_TILT_DEG,
            friction: DEFAULT_FRICTION,
            max_dt_ms: DEFAULT_MAX_DT_MS,
            shake_threshold: DEFAULT_SHAKE_THRESHOLD,
            shake_cooldown_ms: DEFAULT_SHAKE_COOLDOWN_MS,
        }
    }
}

impl WidgetConfig {
    /// Parses a JSON override on top of the build-time defaults.
    pub fn from_json_overrides(raw: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.redirect_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidRedirectUrl(self.redirect_url.clone()));
        }
        if self.redirect_key.trim().is_empty() {
            return Err(ConfigError::EmptyRedirectKey);
        }
        let positive = [
            ("exit_threshold", self.exit_threshold as f64),
            ("gravity_scale", self.gravity_scale as f64),
            ("max_tilt_deg", self.max_tilt_deg as f64),
            ("max_dt_ms", self.max_dt_ms),
            ("shake_threshold", self.shake_threshold),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        if !self.shake_cooldown_ms.is_finite() || self.shake_cooldown_ms < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "shake_cooldown_ms",
                value: self.shake_cooldown_ms,
            });
        }
        Ok(())
    }

    pub fn max_dt_secs(&self) -> f32 {
        (self.max_dt_ms / 1000.0) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidRedirectUrl(String),
    EmptyRedirectKey,
    NotPositive { field: &'static str, value: f64 },
    FrictionOutOfRange(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(message) => write!(f, "invalid widget config: {message}"),
            ConfigError::InvalidRedirectUrl(url) => {
                write!(f, "redirect url '{url}' must be http(s)")
            }
            ConfigError::EmptyRedirectKey => write!(f, "redirect key cannot be empty"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::FrictionOutOfRange(value) => {
                write!(f, "friction must be in (0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_toml() {
        let config = WidgetConfig::default();
        assert_eq!(config.redirect_key, "tbt_redirected");
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.max_dt_secs(), 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_override_keeps_unset_fields() {
        let config = WidgetConfig::from_json_overrides(r#"{"exit_threshold": 64}"#)
            .expect("override parses");
        assert_eq!(config.exit_threshold, 64.0);
        assert_eq!(config.gravity_scale, WidgetConfig::default().gravity_scale);
    }

    #[test]
    fn json_override_rejects_bad_values() {
        let err = WidgetConfig::from_json_overrides(r#"{"redirect_url": "javascript:alert(1)"}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRedirectUrl(_)));

        let err = WidgetConfig::from_json_overrides(r#"{"friction": 1.5}"#).unwrap_err();
        assert_eq!(err, ConfigError::FrictionOutOfRange(1.5));

        let err = WidgetConfig::from_json_overrides(r#"{"gravity": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
