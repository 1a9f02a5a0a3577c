mod error;
mod format;
mod frame_loop;
mod geometry;
mod gesture;
mod keyboard;
mod render;
mod state;
mod sweep;
mod transition;

use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use dialclock_proto::{
    config::{ClockConfig, ClockMode, TimeFormat},
    ports::time_source::TimeSource,
};
use icu::locid::Locale;
use log::{debug, info};

pub use error::WidgetFault;
pub use format::{LongDateFormatter, format_digital, format_time, resolve_locale};
pub use frame_loop::{CancelToken, Frame, FrameLoop, deferred};
pub use geometry::{DialLayout, HandAngles, Numeral, Surface, radius_for};
pub use gesture::{SwipeTracker, TouchInput, TouchPoint};
pub use keyboard::{Control, FocusRing, KeyAction, KeyInput};
pub use render::{AnalogFace, DigitalFace, Presentation, Role, ToggleControl, render};
pub use state::ClockState;
pub use sweep::HandSweep;
pub use transition::{FaceVisibility, InstanceId, Transition, TransitionTicket};

/// Widget settings resolved from [`ClockConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSettings {
    pub initial_mode:    ClockMode,
    pub time_format:     TimeFormat,
    pub transition:      Duration,
    pub swipe_threshold: f32,
    pub radius_fraction: f32,
    pub numeral_inset:   f32,
    pub format_feedback: Duration,
    pub locale:          Locale,
}

impl From<&ClockConfig> for ClockSettings {
    fn from(config: &ClockConfig) -> Self {
        Self {
            initial_mode:    config.initial_mode,
            time_format:     config.time_format,
            transition:      config.transition,
            swipe_threshold: config.swipe_threshold,
            radius_fraction: config.radius_fraction,
            numeral_inset:   config.numeral_inset,
            format_feedback: config.format_feedback,
            locale:          resolve_locale(config.locale.as_deref()),
        }
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self::from(&ClockConfig::default())
    }
}

/// Messages driving a [`ClockWidget`].
#[derive(Debug, Clone)]
pub enum Message {
    /// One display frame; runs the update loop.
    Frame(Instant),
    /// The mode toggle control was activated.
    ToggleMode,
    /// The deferred completion of a mode switch fired.
    TransitionElapsed(TransitionTicket),
    /// The format toggle control was activated.
    ToggleTimeFormat,
    Resized(Surface),
    ReducedMotion(bool),
    Touch(TouchInput),
    Key(KeyInput),
    Focus(Control),
}

/// Follow-up work the host must schedule after a message.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Deliver [`Message::TransitionElapsed`] once `delay` has passed,
    /// unless `token` is cancelled first.
    CompleteTransition {
        ticket: TransitionTicket,
        delay:  Duration,
        token:  CancelToken,
    },
}

impl Effect {
    /// The deferred completion as a future, if any.
    pub fn into_completion(self) -> Option<impl Future<Output = Option<TransitionTicket>>> {
        match self {
            Effect::None => None,
            Effect::CompleteTransition {
                ticket,
                delay,
                token,
            } => Some(deferred(delay, token, ticket)),
        }
    }
}

/// Text last rendered onto the digital face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalReading {
    pub time: String,
    pub date: String,
}

/// Interactive clock with a digital and an analog face.
#[derive(Debug)]
pub struct ClockWidget {
    id:              InstanceId,
    settings:        ClockSettings,
    state:           ClockState,
    surface:         Surface,
    layout:          DialLayout,
    time_source:     Arc<dyn TimeSource>,
    token:           CancelToken,
    frame_loop:      FrameLoop,
    digital:         Option<DigitalReading>,
    hands:           Option<HandAngles>,
    sweep:           HandSweep,
    swipe:           SwipeTracker,
    dates:           LongDateFormatter,
    next_sequence:   u64,
    revealed_at:     Option<Instant>,
    feedback_until:  Option<Instant>,
    destroyed:       bool,
}

impl ClockWidget {
    /// Builds both faces against `surface`, shows the initial face and starts
    /// the update loop.
    pub fn initialize(
        id: InstanceId,
        surface: Surface,
        settings: ClockSettings,
        time_source: Arc<dyn TimeSource>,
        at: Instant,
    ) -> Self {
        let radius = radius_for(surface, settings.radius_fraction);
        let layout = DialLayout::new(radius, settings.numeral_inset);
        let state = ClockState::new(
            settings.initial_mode,
            settings.time_format,
            radius,
            FaceVisibility::shown(at),
        );
        let token = CancelToken::new();

        info!(
            "Clock widget {} mounted on {}x{} in {} mode",
            id.0,
            surface.width,
            surface.height,
            settings.initial_mode.as_str()
        );

        let mut widget = Self {
            id,
            swipe: SwipeTracker::new(settings.swipe_threshold),
            dates: LongDateFormatter::new(&settings.locale),
            settings,
            state,
            surface,
            layout,
            time_source,
            frame_loop: FrameLoop::start(token.clone()),
            token,
            digital: None,
            hands: None,
            sweep: HandSweep::default(),
            next_sequence: 0,
            revealed_at: None,
            feedback_until: None,
            destroyed: false,
        };

        debug!("Clock widget {} formats dates for {}", id.0, widget.dates.locale());

        let now = widget.time_source.now();
        widget.render_active_face(&now, Duration::ZERO);
        widget
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn layout(&self) -> &DialLayout {
        &self.layout
    }

    pub fn digital_reading(&self) -> Option<&DigitalReading> {
        self.digital.as_ref()
    }

    /// Hand angles as currently drawn.
    pub fn hands(&self) -> Option<HandAngles> {
        self.sweep.shown().or(self.hands)
    }

    pub fn revealed_at(&self) -> Option<Instant> {
        self.revealed_at
    }

    pub fn feedback_active(&self, at: Instant) -> bool {
        self.feedback_until.is_some_and(|until| at < until)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the host should keep delivering frames.
    pub fn wants_frames(&self) -> bool {
        !self.destroyed && self.frame_loop.is_running()
    }

    pub fn update(&mut self, message: Message, at: Instant) -> Effect {
        if self.destroyed {
            debug!("Ignoring {message:?} for destroyed clock widget {}", self.id.0);
            return Effect::None;
        }

        match message {
            Message::Frame(frame_at) => {
                self.update_loop(frame_at);
                Effect::None
            }
            Message::ToggleMode => {
                self.state.focus.focus(Control::ModeToggle);
                self.toggle_mode()
            }
            Message::TransitionElapsed(ticket) => {
                self.complete_transition(ticket, at);
                Effect::None
            }
            Message::ToggleTimeFormat => {
                self.state.focus.focus(Control::FormatToggle);
                self.set_time_format(self.state.time_format.toggled(), at);
                Effect::None
            }
            Message::Resized(surface) => {
                self.handle_resize(surface);
                Effect::None
            }
            Message::ReducedMotion(prefers_reduced) => {
                self.handle_reduced_motion(prefers_reduced);
                Effect::None
            }
            Message::Touch(input) => {
                if self.swipe.handle(input) {
                    debug!("Swipe detected on clock widget {}", self.id.0);
                    self.toggle_mode()
                } else {
                    Effect::None
                }
            }
            Message::Key(key) => match self.state.focus.interpret(self.state.mode, key) {
                KeyAction::ToggleMode => self.toggle_mode(),
                KeyAction::ToggleFormat => {
                    self.set_time_format(self.state.time_format.toggled(), at);
                    Effect::None
                }
                KeyAction::FocusMoved(control) => {
                    debug!("Focus moved to {control:?}");
                    Effect::None
                }
                KeyAction::Ignored => Effect::None,
            },
            Message::Focus(control) => {
                if FocusRing::order(self.state.mode).contains(&control) {
                    self.state.focus.focus(control);
                }
                Effect::None
            }
        }
    }

    /// Starts a mode switch unless one is already in flight.
    ///
    /// The outgoing face is hidden at once, the incoming one is displayed and
    /// fades in on the next frame. The returned effect schedules the
    /// completion after the transition window.
    pub fn toggle_mode(&mut self) -> Effect {
        if self.destroyed || self.state.is_transitioning() {
            debug!("Toggle ignored, transition already in flight");
            return Effect::None;
        }

        let from = self.state.mode;
        let to = from.toggled();
        self.next_sequence += 1;
        let ticket = TransitionTicket {
            instance: self.id,
            sequence: self.next_sequence,
        };

        self.state.mode = to;
        *self.state.face_mut(from) = FaceVisibility::hidden();
        *self.state.face_mut(to) = FaceVisibility::pending();
        self.state.focus.retain_for(to);
        self.state.transition = Some(Transition {
            ticket,
            from,
            to,
        });

        debug!("Clock widget {} switching to {}", self.id.0, to.as_str());

        Effect::CompleteTransition {
            ticket,
            delay: self.settings.transition,
            token: self.token.clone(),
        }
    }

    /// Ends the transition identified by `ticket`; stale tickets are ignored.
    pub fn complete_transition(&mut self, ticket: TransitionTicket, at: Instant) -> bool {
        if self.destroyed {
            return false;
        }

        let Some(transition) = self.state.transition else {
            return false;
        };

        if transition.ticket != ticket {
            debug!("Ignoring stale transition ticket {ticket:?}");
            return false;
        }

        let face = self.state.face_mut(transition.to);
        if face.revealed_at.is_none() {
            face.revealed_at = Some(at);
        }

        self.state.transition = None;
        self.state.focus.focus(Control::primary_for(transition.to));
        true
    }

    /// Runs one iteration of the update loop; returns `false` when the loop
    /// has been cancelled.
    pub fn update_loop(&mut self, at: Instant) -> bool {
        let Some(frame) = self.frame_loop.accept(at) else {
            return false;
        };

        if self.revealed_at.is_none() {
            self.revealed_at = Some(frame.at);
        }

        if self.state.transition.is_some() {
            let incoming = self.state.face_mut(self.state.mode);
            if incoming.displayed && incoming.revealed_at.is_none() {
                incoming.revealed_at = Some(frame.at);
            }
        }

        if self.feedback_until.is_some_and(|until| frame.at >= until) {
            self.feedback_until = None;
        }

        let now = self.time_source.now();
        self.render_active_face(&now, frame.delta);
        true
    }

    pub fn set_time_format(&mut self, format: TimeFormat, at: Instant) {
        if self.destroyed {
            return;
        }

        self.state.time_format = format;
        self.feedback_until = Some(at + self.settings.format_feedback);

        let now = self.time_source.now();
        self.render_digital(&now);
    }

    /// Recomputes the dial from the container size; returns whether anything
    /// changed.
    pub fn handle_resize(&mut self, surface: Surface) -> bool {
        if self.destroyed {
            return false;
        }

        self.surface = surface;
        let radius = radius_for(surface, self.settings.radius_fraction);

        if radius == self.state.radius {
            return false;
        }

        self.state.radius = radius;
        self.layout = DialLayout::new(radius, self.settings.numeral_inset);
        true
    }

    pub fn handle_reduced_motion(&mut self, prefers_reduced: bool) {
        if self.destroyed {
            return;
        }

        self.state.reduced_motion = prefers_reduced;

        if prefers_reduced && let Some(target) = self.hands {
            self.sweep.snap(target);
        }
    }

    /// Cancels the update loop and any pending completion and clears all
    /// rendered content.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.token.cancel();
        self.frame_loop.cancel();
        self.destroyed = true;
        self.digital = None;
        self.hands = None;
        self.sweep = HandSweep::default();
        self.swipe = SwipeTracker::new(self.settings.swipe_threshold);
        self.state.transition = None;
        self.state.focus.blur();
        self.feedback_until = None;

        info!("Clock widget {} destroyed", self.id.0);
    }

    fn render_active_face(&mut self, now: &DateTime<Local>, elapsed: Duration) {
        match self.state.mode {
            ClockMode::Digital => self.render_digital(now),
            ClockMode::Analog => {
                let target = HandAngles::of(now);
                self.hands = Some(target);
                self.sweep
                    .advance(target, elapsed, !self.state.reduced_motion);
            }
        }
    }

    fn render_digital(&mut self, now: &DateTime<Local>) {
        self.digital = Some(DigitalReading {
            time: format_time(now, self.state.time_format),
            date: self.dates.format(now),
        });
    }
}

impl Drop for ClockWidget {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests;
