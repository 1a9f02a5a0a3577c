use serde::{Deserialize, Deserializer, de::Error as _};

mod appearance;
mod clock;
mod validation;

pub use appearance::{Appearance, AppearanceColor, MotionPreference};
pub use clock::{ClockConfig, ClockMode, TimeFormat};
pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/dialclock/config.toml";

/// Initial size of the window hosting the clock.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WindowConfig {
    #[serde(deserialize_with = "dimension_deserializer", default = "default_width")]
    pub width:  f32,
    #[serde(deserialize_with = "dimension_deserializer", default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width:  default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> f32 {
    360.
}

fn default_height() -> f32 {
    420.
}

fn dimension_deserializer<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;

    if !value.is_finite() || value < 64.0 {
        return Err(D::Error::custom("Window dimensions must be at least 64 pixels"));
    }

    Ok(value)
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level:  String,
    #[serde(default)]
    pub clock:      ClockConfig,
    #[serde(default)]
    pub window:     WindowConfig,
    #[serde(default)]
    pub appearance: Appearance,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:  default_log_level(),
            clock:      ClockConfig::default(),
            window:     WindowConfig::default(),
            appearance: Appearance::default(),
        }
    }
}
