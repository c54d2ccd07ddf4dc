//! UI configuration, loaded once at startup from a TOML file.
//!
//! ```toml
//! [animation]
//! color-change-ms = 250
//! start-delay-ms = 0
//! easing = "smooth"
//!
//! [activity]
//! fade-ms = 200
//! dim-step = 64
//! ```

use serde::Deserialize;

use helio_core::easing::TransitionType;
use helio_core::time::TransitionTimeSpan;

use crate::error::ConfigError;

/// Animation timings for transitions created by controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnimationConfig {
    /// Duration of color transitions in milliseconds.
    pub color_change_ms: i64,
    /// Start delay applied to restarted transitions, in milliseconds.
    pub start_delay_ms: i64,
    /// Easing curve used by control transitions.
    pub easing: TransitionType,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            color_change_ms: 250,
            start_delay_ms: 0,
            easing: TransitionType::Smooth,
        }
    }
}

impl AnimationConfig {
    /// The color-change duration as a time span.
    #[must_use]
    pub fn color_change_time(&self) -> TransitionTimeSpan {
        TransitionTimeSpan::from_milliseconds(self.color_change_ms)
    }

    /// The start delay as a time span.
    #[must_use]
    pub fn start_delay(&self) -> TransitionTimeSpan {
        TransitionTimeSpan::from_milliseconds(self.start_delay_ms)
    }
}

/// Activity stack presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ActivityConfig {
    /// Duration of the push/pop background fade in milliseconds.
    pub fade_ms: i64,
    /// Per covered layer, the background channels darken by this step
    /// (floored at zero).
    pub dim_step: u8,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            fade_ms: 200,
            dim_step: 0x40,
        }
    }
}

impl ActivityConfig {
    /// The fade duration as a time span.
    #[must_use]
    pub fn fade_time(&self) -> TransitionTimeSpan {
        TransitionTimeSpan::from_milliseconds(self.fade_ms)
    }
}

/// Top-level UI configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UiConfig {
    /// Animation timings.
    pub animation: AnimationConfig,
    /// Activity stack settings.
    pub activity: ActivityConfig,
}

impl UiConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_framework_constants() {
        let config = UiConfig::default();
        assert_eq!(config.activity.dim_step, 0x40);
        assert_eq!(config.activity.fade_ms, 200);
        assert_eq!(config.animation.easing, TransitionType::Smooth);
    }

    #[test]
    fn documented_example_parses() {
        let config = UiConfig::from_toml_str(
            r#"
            [animation]
            color-change-ms = 100
            start-delay-ms = 16
            easing = "ease-out-sine"

            [activity]
            fade-ms = 150
            dim-step = 32
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.color_change_ms, 100);
        assert_eq!(config.animation.easing, TransitionType::EaseOutSine);
        assert_eq!(config.activity.dim_step, 32);
        assert_eq!(config.activity.fade_time(), TransitionTimeSpan::from_milliseconds(150));
    }

    #[test]
    fn unknown_easing_is_a_config_error() {
        let result = UiConfig::from_toml_str(
            r#"
            [animation]
            easing = "bounce"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
    }
}
