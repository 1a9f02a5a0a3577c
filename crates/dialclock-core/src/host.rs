use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Instant,
};

use dialclock_proto::ports::time_source::TimeSource;
use log::{debug, error, info};

use crate::clock::{
    ClockSettings, ClockWidget, Effect, InstanceId, Message, Surface, TransitionTicket, WidgetFault,
};

/// Owning handle for the clock widget.
///
/// The host is created only when a container exists, routes every event to
/// the widget through an error boundary, and restarts the widget from scratch
/// when it faults. Environment state that outlives an instance (container
/// bounds, reduced-motion preference) is kept here and replayed into fresh
/// instances.
#[derive(Debug)]
pub struct ClockHost {
    surface:        Surface,
    settings:       ClockSettings,
    time_source:    Arc<dyn TimeSource>,
    reduced_motion: bool,
    widget:         Option<ClockWidget>,
    next_instance:  u64,
    restarts:       u32,
}

impl ClockHost {
    /// Mounts a widget on `container`; returns `None` when there is no
    /// container to mount on.
    pub fn mount(
        container: Option<Surface>,
        settings: ClockSettings,
        time_source: Arc<dyn TimeSource>,
        at: Instant,
    ) -> Option<Self> {
        let Some(surface) = container else {
            debug!("No clock container available, skipping mount");
            return None;
        };

        let mut host = Self {
            surface,
            settings,
            time_source,
            reduced_motion: false,
            widget: None,
            next_instance: 0,
            restarts: 0,
        };

        host.construct(at);
        Some(host)
    }

    pub fn widget(&self) -> Option<&ClockWidget> {
        self.widget.as_ref()
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn wants_frames(&self) -> bool {
        self.widget.as_ref().is_some_and(ClockWidget::wants_frames)
    }

    /// Routes `message` to the widget, recovering it if the handler faults.
    pub fn dispatch(&mut self, message: Message, at: Instant) -> Effect {
        match &message {
            Message::Resized(surface) => self.surface = *surface,
            Message::ReducedMotion(prefers_reduced) => self.reduced_motion = *prefers_reduced,
            Message::TransitionElapsed(ticket) if !self.owns(ticket) => {
                debug!("Dropping completion for retired instance {}", ticket.instance.0);
                return Effect::None;
            }
            _ => {}
        }

        let Some(widget) = self.widget.as_mut() else {
            return Effect::None;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let effect = widget.update(message, at);
            widget.state().check_invariants().map(|()| effect)
        }));

        match outcome {
            Ok(Ok(effect)) => effect,
            Ok(Err(fault)) => {
                self.recover(fault, at);
                Effect::None
            }
            Err(payload) => {
                self.recover(WidgetFault::panicked(panic_message(payload.as_ref())), at);
                Effect::None
            }
        }
    }

    /// Delivers a deferred transition completion; tickets issued by retired
    /// instances are dropped.
    pub fn complete_transition(&mut self, ticket: TransitionTicket, at: Instant) {
        self.dispatch(Message::TransitionElapsed(ticket), at);
    }

    /// Replaces the faulted instance with a fresh one on the same container.
    pub fn recover(&mut self, fault: WidgetFault, at: Instant) {
        error!("Clock error: {fault}");

        self.teardown();
        self.restarts += 1;
        self.construct(at);

        info!("Clock widget recovered (restart #{})", self.restarts);
    }

    /// Rebuilds the widget with new settings.
    pub fn reconfigure(&mut self, settings: ClockSettings, at: Instant) {
        if settings == self.settings && self.widget.is_some() {
            return;
        }

        self.settings = settings;
        self.teardown();
        self.construct(at);
    }

    /// Destroys the current instance, leaving the host empty.
    pub fn teardown(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.destroy();
        }
    }

    fn owns(&self, ticket: &TransitionTicket) -> bool {
        self.widget
            .as_ref()
            .is_some_and(|widget| widget.id() == ticket.instance)
    }

    fn construct(&mut self, at: Instant) {
        self.next_instance += 1;

        let mut widget = ClockWidget::initialize(
            InstanceId(self.next_instance),
            self.surface,
            self.settings.clone(),
            Arc::clone(&self.time_source),
            at,
        );
        widget.handle_reduced_motion(self.reduced_motion);

        self.widget = Some(widget);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
