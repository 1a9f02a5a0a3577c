use dialclock_proto::config::ClockMode;

/// Interactive controls of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Switches between the digital and the analog face.
    ModeToggle,
    /// Switches the digital face between 12 and 24 hours.
    FormatToggle,
    /// The analog dial, focusable so keyboard users land somewhere useful.
    Dial,
}

impl Control {
    /// Primary control of the face shown in `mode`.
    pub const fn primary_for(mode: ClockMode) -> Self {
        match mode {
            ClockMode::Digital => Self::FormatToggle,
            ClockMode::Analog => Self::Dial,
        }
    }
}

/// Keys the widget reacts to, stripped of toolkit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Character(char),
    Tab { shift: bool },
    /// Enter or Space.
    Activate,
}

/// What a key press asks the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMode,
    ToggleFormat,
    FocusMoved(Control),
    Ignored,
}

/// Keyboard focus confined to the widget's controls.
///
/// Tab from the last control wraps to the first and Shift+Tab from the first
/// wraps to the last. The set of controls depends on which face is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusRing {
    focused: Option<Control>,
}

impl FocusRing {
    /// Controls in tab order for the face shown in `mode`.
    pub fn order(mode: ClockMode) -> [Control; 2] {
        [Control::primary_for(mode), Control::ModeToggle]
    }

    pub fn focused(&self) -> Option<Control> {
        self.focused
    }

    pub fn is_focused(&self, control: Control) -> bool {
        self.focused == Some(control)
    }

    pub fn focus(&mut self, control: Control) {
        self.focused = Some(control);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Drops focus from a control that is no longer part of `mode`'s face.
    pub fn retain_for(&mut self, mode: ClockMode) {
        if let Some(control) = self.focused
            && !Self::order(mode).contains(&control)
        {
            self.focused = None;
        }
    }

    pub fn advance(&mut self, mode: ClockMode, backwards: bool) -> Control {
        let order = Self::order(mode);
        let position = self
            .focused
            .and_then(|control| order.iter().position(|candidate| *candidate == control));

        let next = match (position, backwards) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(index), false) => (index + 1) % order.len(),
            (Some(index), true) => (index + order.len() - 1) % order.len(),
        };

        self.focused = Some(order[next]);
        order[next]
    }

    /// Interprets a key press against the current focus.
    pub fn interpret(&mut self, mode: ClockMode, key: KeyInput) -> KeyAction {
        match key {
            KeyInput::Character(c) if c.eq_ignore_ascii_case(&'m') => KeyAction::ToggleMode,
            KeyInput::Character(_) => KeyAction::Ignored,
            KeyInput::Tab { shift } => KeyAction::FocusMoved(self.advance(mode, shift)),
            KeyInput::Activate => match self.focused {
                Some(Control::ModeToggle) => KeyAction::ToggleMode,
                Some(Control::FormatToggle) if mode == ClockMode::Digital => {
                    KeyAction::ToggleFormat
                }
                _ => KeyAction::Ignored,
            },
        }
    }
}
