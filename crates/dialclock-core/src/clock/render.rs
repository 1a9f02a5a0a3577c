//! Pure mapping from widget state to what should be on screen.
//!
//! The output carries semantic state only: which faces take part in layout,
//! their opacity, labels and roles. Turning that into pixels is up to the
//! toolkit layer.

use std::time::{Duration, Instant};

use dialclock_proto::config::{ClockMode, TimeFormat};

use super::{ClockWidget, Control, DialLayout, FaceVisibility, HandAngles};

pub const REGION_LABEL: &str = "Interactive clock";
pub const TIMER_LABEL: &str = "Digital clock";

/// Accessibility role of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Region,
    Timer,
    Presentation,
    Checkbox,
    Button,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleControl {
    pub role:    Role,
    pub checked: bool,
    /// Describes the state the control switches to.
    pub label:   &'static str,
    pub focused: bool,
    /// Short feedback state right after activation.
    pub pressed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DigitalFace {
    pub role:          Role,
    pub label:         &'static str,
    pub time:          String,
    pub date:          String,
    pub opacity:       f32,
    pub format_toggle: ToggleControl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalogFace {
    pub role:     Role,
    pub layout:   DialLayout,
    pub hands:    HandAngles,
    pub opacity:  f32,
    /// Whether the hands sweep between positions or snap.
    pub animated: bool,
    pub focused:  bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub role:          Role,
    pub label:         &'static str,
    /// Value a stylesheet would read from `data-mode`.
    pub mode:          ClockMode,
    pub transitioning: bool,
    pub opacity:       f32,
    pub digital:       Option<DigitalFace>,
    pub analog:        Option<AnalogFace>,
    pub mode_toggle:   ToggleControl,
}

impl Presentation {
    pub fn data_mode(&self) -> &'static str {
        self.mode.as_str()
    }
}

/// Renders `widget` as of `at`; a destroyed widget renders nothing.
pub fn render(widget: &ClockWidget, at: Instant) -> Option<Presentation> {
    if widget.is_destroyed() {
        return None;
    }

    let state = widget.state();
    let window = widget.settings().transition;
    let reduced = state.reduced_motion();
    let focus = state.focus();

    let digital_visibility = state.face(ClockMode::Digital);
    let digital = digital_visibility.displayed.then(|| {
        let reading = widget.digital_reading().cloned().unwrap_or_default();

        DigitalFace {
            role:          Role::Timer,
            label:         TIMER_LABEL,
            time:          reading.time,
            date:          reading.date,
            opacity:       face_opacity(digital_visibility, at, window, reduced),
            format_toggle: ToggleControl {
                role:    Role::Button,
                checked: state.time_format() == TimeFormat::Hour24,
                label:   format_label(state.time_format()),
                focused: focus.is_focused(Control::FormatToggle),
                pressed: widget.feedback_active(at),
            },
        }
    });

    let analog_visibility = state.face(ClockMode::Analog);
    let analog = analog_visibility.displayed.then(|| AnalogFace {
        role:     Role::Presentation,
        layout:   *widget.layout(),
        hands:    widget.hands().unwrap_or(HandAngles::at(0, 0, 0)),
        opacity:  face_opacity(analog_visibility, at, window, reduced),
        animated: !reduced,
        focused:  focus.is_focused(Control::Dial),
    });

    Some(Presentation {
        role: Role::Region,
        label: REGION_LABEL,
        mode: state.mode(),
        transitioning: state.is_transitioning(),
        opacity: fade(widget.revealed_at(), at, window, reduced),
        digital,
        analog,
        mode_toggle: ToggleControl {
            role:    Role::Checkbox,
            checked: state.mode() == ClockMode::Analog,
            label:   mode_label(state.mode()),
            focused: focus.is_focused(Control::ModeToggle),
            pressed: false,
        },
    })
}

pub fn mode_label(mode: ClockMode) -> &'static str {
    match mode {
        ClockMode::Digital => "Switch to analog clock",
        ClockMode::Analog => "Switch to digital clock",
    }
}

pub fn format_label(format: TimeFormat) -> &'static str {
    match format {
        TimeFormat::Hour12 => "Switch to 24-hour format",
        TimeFormat::Hour24 => "Switch to 12-hour format",
    }
}

fn face_opacity(visibility: FaceVisibility, at: Instant, window: Duration, reduced: bool) -> f32 {
    if !visibility.displayed {
        return 0.0;
    }

    fade(visibility.revealed_at, at, window, reduced)
}

/// Fade-in progress of something revealed at `revealed_at`.
fn fade(revealed_at: Option<Instant>, at: Instant, window: Duration, reduced: bool) -> f32 {
    let Some(revealed_at) = revealed_at else {
        return 0.0;
    };

    if reduced || window.is_zero() {
        return 1.0;
    }

    let elapsed = at.saturating_duration_since(revealed_at);
    (elapsed.as_secs_f32() / window.as_secs_f32()).clamp(0.0, 1.0)
}
