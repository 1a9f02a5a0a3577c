use std::time::Instant;

use dialclock_proto::config::ClockMode;

/// Identity of one widget instance; a recovered widget gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// Identifies one in-flight mode switch of one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket {
    pub instance: InstanceId,
    pub sequence: u64,
}

/// Visibility of a single face.
///
/// `displayed` mirrors whether the face takes part in layout at all;
/// `revealed_at` records when it was faded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceVisibility {
    pub displayed:   bool,
    pub revealed_at: Option<Instant>,
}

impl FaceVisibility {
    pub fn shown(at: Instant) -> Self {
        Self {
            displayed:   true,
            revealed_at: Some(at),
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    /// Displayed but waiting for the next frame to fade in.
    pub fn pending() -> Self {
        Self {
            displayed:   true,
            revealed_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.displayed && self.revealed_at.is_some()
    }
}

/// A mode switch between the request and its deferred completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub ticket: TransitionTicket,
    pub from:   ClockMode,
    pub to:     ClockMode,
}
