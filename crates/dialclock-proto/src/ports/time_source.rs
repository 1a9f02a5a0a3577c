use std::fmt::Debug;

use chrono::{DateTime, Local};

/// Source of the current wall-clock time.
///
/// Implementations must be cheap to call: the widget reads the time exactly
/// once per rendered frame.
pub trait TimeSource: Debug + Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// [`TimeSource`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
