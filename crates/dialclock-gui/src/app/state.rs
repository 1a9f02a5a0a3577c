use std::{path::PathBuf, sync::Arc, time::Instant};

use dialclock_core::{
    ClockHost,
    clock::{self, ClockSettings, Surface},
    config::{ConfigApplied, ConfigDegradation, ConfigManager},
    services::{ServiceEvent, motion::MotionService},
};
use dialclock_proto::{config::Config, ports::time_source::TimeSource};
use flexi_logger::LoggerHandle;
use iced::{Size, Task, Theme, task, window};
use log::info;

pub struct App {
    pub(super) config_path:           PathBuf,
    pub(super) logger:                LoggerHandle,
    pub(super) config_manager:        Arc<ConfigManager>,
    /// Abort handle of the scheduled transition completion, if any.
    pub(super) pending_completion:    Option<task::Handle>,
    /// Desktop reduced-motion service; `None` until it reports in.
    pub(super) motion:                Option<MotionService>,
    pub(super) theme:                 Theme,
    pub config:                       Config,
    pub clock:                        Option<ClockHost>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Clock(clock::Message),
    WindowResized(window::Id, Size),
    ConfigChanged(ConfigApplied),
    ConfigDegraded(ConfigDegradation),
    Motion(ServiceEvent<MotionService>),
}

impl App {
    pub fn new(
        (logger, config, config_path, time_source): (
            LoggerHandle,
            Config,
            PathBuf,
            Arc<dyn TimeSource>,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let config_manager = Arc::new(ConfigManager::new(config.clone()));
            let container = Surface::new(config.window.width, config.window.height);

            let clock = ClockHost::mount(
                Some(container),
                ClockSettings::from(&config.clock),
                time_source,
                Instant::now(),
            );

            info!("Clock mounted: {}", clock.is_some());

            let mut app = App {
                config_path,
                logger,
                config_manager,
                pending_completion: None,
                motion: None,
                theme: theme_for(&config),
                config,
                clock,
            };

            let task = app.sync_reduced_motion();

            (app, task)
        }
    }

    /// Effective reduced-motion preference: configuration first, desktop
    /// second.
    pub fn prefers_reduced_motion(&self) -> bool {
        self.config
            .appearance
            .reduced_motion
            .prefers_reduced(self.motion.as_ref().and_then(|motion| motion.reduced))
    }
}

pub(super) fn theme_for(config: &Config) -> Theme {
    Theme::custom(String::from("dialclock"), config.appearance.palette())
}
