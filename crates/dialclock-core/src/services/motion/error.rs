use std::sync::Arc;

/// Error type emitted by the reduced-motion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// The session bus or the settings portal could not be reached.
    DBus { context: Arc<str> },

    /// The portal answered with something other than a boolean.
    UnexpectedValue { context: Arc<str> },
}

impl std::fmt::Display for MotionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DBus { context } => {
                write!(f, "failed to query the settings portal: {context}")
            }
            Self::UnexpectedValue { context } => {
                write!(f, "unexpected animation setting: {context}")
            }
        }
    }
}

impl std::error::Error for MotionError {}

impl MotionError {
    pub fn dbus(context: impl Into<String>) -> Self {
        Self::DBus {
            context: Arc::from(context.into()),
        }
    }

    pub fn unexpected_value(context: impl Into<String>) -> Self {
        Self::UnexpectedValue {
            context: Arc::from(context.into()),
        }
    }
}

impl From<masterror::AppError> for MotionError {
    fn from(value: masterror::AppError) -> Self {
        MotionError::dbus(value.to_string())
    }
}

impl From<zbus::Error> for MotionError {
    fn from(value: zbus::Error) -> Self {
        MotionError::dbus(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            MotionError::dbus("no session bus").to_string(),
            "failed to query the settings portal: no session bus"
        );
        assert_eq!(
            MotionError::unexpected_value("s \"yes\"").to_string(),
            "unexpected animation setting: s \"yes\""
        );
    }
}
