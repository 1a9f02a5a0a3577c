use std::time::Duration;

use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};

/// Which face of the clock is visible.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Digital,
    Analog,
}

impl ClockMode {
    /// The mode a toggle switches to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Digital => Self::Analog,
            Self::Analog => Self::Digital,
        }
    }

    /// Value of the `data-mode` attribute a stylesheet would key on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Digital => "digital",
            Self::Analog => "analog",
        }
    }
}

/// Display convention for the digital face.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "24h")]
    Hour24,
}

impl TimeFormat {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hour12 => Self::Hour24,
            Self::Hour24 => Self::Hour12,
        }
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ClockConfig {
    #[serde(default)]
    pub initial_mode:    ClockMode,
    #[serde(default)]
    pub time_format:     TimeFormat,
    /// Length of the window during which a mode switch is in flight.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "transition_ms", default = "default_transition")]
    pub transition:      Duration,
    /// Minimum drag distance, in logical pixels, that counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
    /// Dial radius as a fraction of the smaller container dimension.
    #[serde(default = "default_radius_fraction")]
    pub radius_fraction: f32,
    /// Distance of the numerals from the center, relative to the radius.
    #[serde(default = "default_numeral_inset")]
    pub numeral_inset:   f32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "format_feedback_ms", default = "default_format_feedback")]
    pub format_feedback: Duration,
    /// POSIX locale name for the long date, e.g. `fr_FR`. Unset follows the
    /// host locale.
    #[serde(default)]
    pub locale:          Option<String>,
}

fn default_transition() -> Duration {
    Duration::from_millis(300)
}

fn default_swipe_threshold() -> f32 {
    50.
}

fn default_radius_fraction() -> f32 {
    0.4
}

fn default_numeral_inset() -> f32 {
    0.85
}

fn default_format_feedback() -> Duration {
    Duration::from_millis(200)
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_mode:    ClockMode::default(),
            time_format:     TimeFormat::default(),
            transition:      default_transition(),
            swipe_threshold: default_swipe_threshold(),
            radius_fraction: default_radius_fraction(),
            numeral_inset:   default_numeral_inset(),
            format_feedback: default_format_feedback(),
            locale:          None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_toggle_back_and_forth() {
        assert_eq!(ClockMode::Digital.toggled(), ClockMode::Analog);
        assert_eq!(ClockMode::Digital.toggled().toggled(), ClockMode::Digital);
        assert_eq!(TimeFormat::Hour12.toggled(), TimeFormat::Hour24);
    }

    #[test]
    fn mode_attribute_values() {
        assert_eq!(ClockMode::Digital.as_str(), "digital");
        assert_eq!(ClockMode::Analog.as_str(), "analog");
    }
}
