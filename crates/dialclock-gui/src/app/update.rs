use std::{sync::Arc, time::Instant};

use dialclock_core::{
    clock::{ClockSettings, Effect, Message as ClockMessage, Surface},
    config::{self, ConfigApplied, ConfigEvent},
    services::{
        ReadOnlyService, ServiceEvent,
        motion::MotionService,
    },
};
use iced::{Event, Size, Subscription, Task, event::listen_with, keyboard, window};
use log::{debug, info, warn};

use super::{
    input::{key_input, touch_input},
    state::{App, Message, theme_for},
};
use crate::get_log_spec;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Clock(message) => self.dispatch(message),
            Message::WindowResized(_, size) => {
                self.dispatch(ClockMessage::Resized(Surface::new(size.width, size.height)))
            }
            Message::ConfigChanged(ConfigApplied { config, impact }) => {
                info!("New config applied");
                debug!("Config impact: {impact:?}");

                self.config = Arc::unwrap_or_clone(config);
                let mut tasks = Vec::new();

                if impact.log_level_changed {
                    self.logger.set_new_spec(get_log_spec(&self.config.log_level));
                }

                if impact.appearance_changed {
                    debug!("Rebuilding theme from new appearance");
                    self.theme = theme_for(&self.config);
                }

                if impact.window_changed {
                    let size = Size::new(self.config.window.width, self.config.window.height);
                    tasks.push(
                        window::get_latest()
                            .and_then(move |id| window::resize::<Message>(id, size)),
                    );
                }

                if impact.clock_changed {
                    self.abort_pending_completion();

                    if let Some(host) = self.clock.as_mut() {
                        host.reconfigure(ClockSettings::from(&self.config.clock), Instant::now());
                    }
                }

                if impact.motion_changed || impact.clock_changed {
                    tasks.push(self.sync_reduced_motion());
                }

                Task::batch(tasks)
            }
            Message::ConfigDegraded(degradation) => {
                warn!("Configuration degradation reported: {}", degradation.reason);
                Task::none()
            }
            Message::Motion(event) => {
                match event {
                    ServiceEvent::Init(service) => {
                        self.motion = Some(service);
                    }
                    ServiceEvent::Update(event) => match self.motion.as_mut() {
                        Some(motion) => motion.update(event),
                        None => {
                            debug!("Dropping reduced-motion update before service init");
                        }
                    },
                    ServiceEvent::Error(err) => {
                        warn!("Reduced-motion preference unavailable: {err}");
                        self.motion = None;
                    }
                }

                self.sync_reduced_motion()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            window::resize_events().map(|(id, size)| Message::WindowResized(id, size)),
            keyboard::on_key_press(|key, modifiers| {
                key_input(key, modifiers).map(|key| Message::Clock(ClockMessage::Key(key)))
            }),
            listen_with(|event, _, _| match event {
                Event::Touch(touch) => {
                    Some(Message::Clock(ClockMessage::Touch(touch_input(touch))))
                }
                _ => None,
            }),
            config::subscription(&self.config_path, Arc::clone(&self.config_manager)).map(
                |event| match event {
                    ConfigEvent::Applied(config) => Message::ConfigChanged(config),
                    ConfigEvent::Degraded(degradation) => Message::ConfigDegraded(degradation),
                },
            ),
            MotionService::subscribe().map(Message::Motion),
        ];

        if self.clock.as_ref().is_some_and(|host| host.wants_frames()) {
            subscriptions
                .push(window::frames().map(|at| Message::Clock(ClockMessage::Frame(at))));
        }

        Subscription::batch(subscriptions)
    }

    /// Pushes the effective reduced-motion preference into the widget.
    pub(super) fn sync_reduced_motion(&mut self) -> Task<Message> {
        self.dispatch(ClockMessage::ReducedMotion(self.prefers_reduced_motion()))
    }

    fn dispatch(&mut self, message: ClockMessage) -> Task<Message> {
        let Some(host) = self.clock.as_mut() else {
            return Task::none();
        };

        let effect = host.dispatch(message, Instant::now());
        self.schedule(effect)
    }

    fn schedule(&mut self, effect: Effect) -> Task<Message> {
        let Some(completion) = effect.into_completion() else {
            return Task::none();
        };

        let (task, handle) = Task::future(completion)
            .and_then(|ticket| Task::done(Message::Clock(ClockMessage::TransitionElapsed(ticket))))
            .abortable();

        self.abort_pending_completion();
        self.pending_completion = Some(handle);

        task
    }

    fn abort_pending_completion(&mut self) {
        if let Some(handle) = self.pending_completion.take() {
            handle.abort();
        }
    }
}
