use std::time::Duration;

use chrono::Locale;

use super::Config;

const MAX_TRANSITION: Duration = Duration::from_secs(5);

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// The transition window is zero or unreasonably long.
    TransitionWindow { millis: u128 },

    /// The swipe threshold is not a positive distance.
    SwipeThreshold { value: f32 },

    /// The dial radius fraction falls outside `(0, 0.5]`.
    RadiusFraction { value: f32 },

    /// The numeral inset falls outside `(0, 1]`.
    NumeralInset { value: f32 },

    /// The configured locale name is unknown.
    UnknownLocale { name: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransitionWindow { millis } => {
                write!(
                    f,
                    "transition window of {}ms must be between 1ms and {}ms",
                    millis,
                    MAX_TRANSITION.as_millis()
                )
            }
            Self::SwipeThreshold { value } => {
                write!(f, "swipe threshold {} must be a positive distance", value)
            }
            Self::RadiusFraction { value } => {
                write!(f, "radius fraction {} must be within (0, 0.5]", value)
            }
            Self::NumeralInset { value } => {
                write!(f, "numeral inset {} must be within (0, 1]", value)
            }
            Self::UnknownLocale { name } => write!(f, "unknown locale '{}'", name),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Validates the configuration, ensuring clock geometry and timing are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] for the first out-of-range setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let clock = &self.clock;

        if clock.transition.is_zero() || clock.transition > MAX_TRANSITION {
            return Err(ConfigValidationError::TransitionWindow {
                millis: clock.transition.as_millis(),
            });
        }

        if !(clock.swipe_threshold.is_finite() && clock.swipe_threshold > 0.0) {
            return Err(ConfigValidationError::SwipeThreshold {
                value: clock.swipe_threshold,
            });
        }

        if !(clock.radius_fraction > 0.0 && clock.radius_fraction <= 0.5) {
            return Err(ConfigValidationError::RadiusFraction {
                value: clock.radius_fraction,
            });
        }

        if !(clock.numeral_inset > 0.0 && clock.numeral_inset <= 1.0) {
            return Err(ConfigValidationError::NumeralInset {
                value: clock.numeral_inset,
            });
        }

        if let Some(name) = clock.locale.as_deref()
            && Locale::try_from(name).is_err()
        {
            return Err(ConfigValidationError::UnknownLocale {
                name: name.to_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;

    fn with_clock(clock: ClockConfig) -> Config {
        Config {
            clock,
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_transition() {
        let config = with_clock(ClockConfig {
            transition: Duration::ZERO,
            ..Default::default()
        });

        let error = config.validate().expect_err("expected transition error");
        assert!(matches!(
            error,
            ConfigValidationError::TransitionWindow { millis: 0 }
        ));
    }

    #[test]
    fn validate_rejects_negative_swipe_threshold() {
        let config = with_clock(ClockConfig {
            swipe_threshold: -3.0,
            ..Default::default()
        });

        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SwipeThreshold { .. })
        ));
    }

    #[test]
    fn validate_rejects_oversized_radius() {
        let config = with_clock(ClockConfig {
            radius_fraction: 0.75,
            ..Default::default()
        });

        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::RadiusFraction { .. })
        ));
    }

    #[test]
    fn validate_checks_locale_names() {
        let config = with_clock(ClockConfig {
            locale: Some("fr_FR".to_owned()),
            ..Default::default()
        });
        assert!(config.validate().is_ok());

        let config = with_clock(ClockConfig {
            locale: Some("xx_NOPE".to_owned()),
            ..Default::default()
        });
        let error = config.validate().expect_err("expected locale error");
        assert!(matches!(
            error,
            ConfigValidationError::UnknownLocale { ref name } if name == "xx_NOPE"
        ));
    }
}
