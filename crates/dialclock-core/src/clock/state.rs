use dialclock_proto::config::{ClockMode, TimeFormat};

use super::{
    error::WidgetFault,
    keyboard::FocusRing,
    transition::{FaceVisibility, Transition},
};

/// Explicit state of a clock widget, kept apart from any rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    pub(super) mode:           ClockMode,
    pub(super) time_format:    TimeFormat,
    pub(super) transition:     Option<Transition>,
    pub(super) radius:         f32,
    pub(super) reduced_motion: bool,
    pub(super) digital:        FaceVisibility,
    pub(super) analog:         FaceVisibility,
    pub(super) focus:          FocusRing,
}

impl ClockState {
    pub(super) fn new(mode: ClockMode, time_format: TimeFormat, radius: f32, visible: FaceVisibility) -> Self {
        let (digital, analog) = match mode {
            ClockMode::Digital => (visible, FaceVisibility::hidden()),
            ClockMode::Analog => (FaceVisibility::hidden(), visible),
        };

        Self {
            mode,
            time_format,
            transition: None,
            radius,
            reduced_motion: false,
            digital,
            analog,
            focus: FocusRing::default(),
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn face(&self, mode: ClockMode) -> FaceVisibility {
        match mode {
            ClockMode::Digital => self.digital,
            ClockMode::Analog => self.analog,
        }
    }

    pub(super) fn face_mut(&mut self, mode: ClockMode) -> &mut FaceVisibility {
        match mode {
            ClockMode::Digital => &mut self.digital,
            ClockMode::Analog => &mut self.analog,
        }
    }

    /// Number of faces currently visible (displayed and revealed).
    pub fn visible_faces(&self) -> usize {
        usize::from(self.digital.is_visible()) + usize::from(self.analog.is_visible())
    }

    pub fn check_invariants(&self) -> Result<(), WidgetFault> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(WidgetFault::invariant("dial radius is not a finite distance"));
        }

        match &self.transition {
            None => {
                if self.visible_faces() != 1 {
                    return Err(WidgetFault::invariant(
                        "exactly one face must be visible outside a transition",
                    ));
                }

                if !self.face(self.mode).is_visible() {
                    return Err(WidgetFault::invariant("visible face does not match the mode"));
                }
            }
            Some(transition) => {
                if transition.to != self.mode {
                    return Err(WidgetFault::invariant("transition target does not match the mode"));
                }

                if self.face(transition.from).displayed {
                    return Err(WidgetFault::invariant("outgoing face is still displayed"));
                }
            }
        }

        Ok(())
    }
}
