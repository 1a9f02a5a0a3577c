use std::sync::Arc;

/// Runtime fault raised inside a widget instance.
///
/// A fault is never handled in place: the host tears the instance down and
/// builds a fresh one against the same container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetFault {
    /// A widget operation panicked.
    Panicked { message: Arc<str> },

    /// The widget state broke one of its invariants.
    InvariantViolated { detail: &'static str },
}

impl std::fmt::Display for WidgetFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Panicked { message } => write!(f, "clock widget panicked: {}", message),
            Self::InvariantViolated { detail } => {
                write!(f, "clock widget invariant violated: {}", detail)
            }
        }
    }
}

impl std::error::Error for WidgetFault {}

impl WidgetFault {
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::Panicked {
            message: Arc::<str>::from(message.into()),
        }
    }

    pub const fn invariant(detail: &'static str) -> Self {
        Self::InvariantViolated { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_the_cause() {
        let fault = WidgetFault::panicked("boom");
        assert_eq!(fault.to_string(), "clock widget panicked: boom");

        let fault = WidgetFault::invariant("both faces visible");
        assert!(fault.to_string().contains("both faces visible"));
    }
}
