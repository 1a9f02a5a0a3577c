use std::{
    any::TypeId,
    ffi::{OsStr, OsString},
    fmt::Display,
    future::Future,
    path::Path,
    pin::Pin,
    sync::Arc,
};

use iced::{
    Subscription,
    futures::{
        SinkExt, Stream, StreamExt,
        channel::mpsc::{SendError, Sender},
        pin_mut,
    },
    stream::channel,
};
use inotify::{EventMask, Inotify, WatchMask};
use log::{debug, error, info, warn};

use super::{
    ConfigReadError,
    manager::{ConfigApplied, ConfigDegradation, ConfigManager, ConfigUpdateError},
    read_config,
};

/// Events produced by the configuration watcher subscription.
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// A new, validated configuration was applied.
    Applied(ConfigApplied),
    /// The configuration could not be refreshed and the previous state is
    /// retained.
    Degraded(ConfigDegradation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Changed,
    Removed,
}

trait WatchedEvent {
    fn file_name(&self) -> Option<&OsStr>;

    fn mask(&self) -> EventMask;
}

impl WatchedEvent for inotify::Event<OsString> {
    fn file_name(&self) -> Option<&OsStr> {
        self.name.as_deref()
    }

    fn mask(&self) -> EventMask {
        self.mask
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchLoopOutcome {
    StreamEnded,
    HandlerClosed,
}

fn interpret_event<E: WatchedEvent>(event: &E, target_name: &OsStr) -> Option<Event> {
    let name = event.file_name()?;

    if name != target_name {
        return None;
    }

    let mask = event.mask();
    let is_removed = mask.intersects(EventMask::DELETE | EventMask::MOVED_FROM);
    let is_changed = mask.intersects(
        EventMask::CREATE | EventMask::MODIFY | EventMask::MOVED_TO | EventMask::CLOSE_WRITE,
    );

    if is_removed && !is_changed {
        debug!("Config file deleted or moved away");
        Some(Event::Removed)
    } else if is_changed {
        debug!("Config file changed");
        Some(Event::Changed)
    } else {
        None
    }
}

/// Drains batches of raw events, forwarding the last relevant one per batch.
async fn process_event_batches<S, E, Err, F, Fut>(
    mut stream: Pin<&mut S>,
    target_name: &OsStr,
    mut handler: F,
) -> WatchLoopOutcome
where
    S: Stream<Item = Vec<Result<E, Err>>>,
    E: WatchedEvent + std::fmt::Debug,
    Err: Display,
    F: FnMut(Event) -> Fut,
    Fut: Future<Output = Result<(), SendError>>,
{
    while let Some(batch) = stream.as_mut().next().await {
        let mut file_event = None;

        for event in batch {
            match event {
                Ok(event) => {
                    debug!("Event: {event:?}");

                    if let Some(kind) = interpret_event(&event, target_name) {
                        file_event = Some(kind);
                    }
                }
                Err(err) => {
                    error!("Failed to read watch event: {err}");
                }
            }
        }

        let Some(kind) = file_event else {
            continue;
        };

        if let Err(err) = handler(kind).await {
            warn!("Stopping config watch because handler returned an error: {err}");
            return WatchLoopOutcome::HandlerClosed;
        }
    }

    WatchLoopOutcome::StreamEnded
}

async fn handle_watch_event(
    output: &mut Sender<ConfigEvent>,
    path: &Path,
    event: Event,
    manager: Arc<ConfigManager>,
) -> Result<(), SendError> {
    match event {
        Event::Changed => {
            info!("Reload config file");

            match load_candidate(path, &manager) {
                Ok(applied) => output.send(ConfigEvent::Applied(applied)).await,
                Err(reason) => {
                    warn!("Configuration update failed: {reason}");
                    send_degradation(output, &manager, reason).await
                }
            }
        }
        Event::Removed => {
            info!("Config file removed");

            send_degradation(output, &manager, ConfigUpdateError::Removed).await
        }
    }
}

fn load_candidate(path: &Path, manager: &ConfigManager) -> Result<ConfigApplied, ConfigUpdateError> {
    let config = read_config(path).map_err(convert_read_error)?;

    config.validate()?;

    manager
        .apply(config)
        .map_err(|err| ConfigUpdateError::state(err.to_string()))
}

fn convert_read_error(err: ConfigReadError) -> ConfigUpdateError {
    match err {
        ConfigReadError::Read { path, source } => ConfigUpdateError::read(path, &source),
        ConfigReadError::Parse { path, source } => ConfigUpdateError::parse(path, &source),
    }
}

async fn send_degradation(
    output: &mut Sender<ConfigEvent>,
    manager: &ConfigManager,
    reason: ConfigUpdateError,
) -> Result<(), SendError> {
    match manager.degraded(reason) {
        Ok(degradation) => output.send(ConfigEvent::Degraded(degradation)).await,
        Err(err) => {
            error!("Failed to report configuration degradation: {err}");
            Ok(())
        }
    }
}

/// Watches the directory holding `path` and reports configuration reloads.
pub fn subscription(path: &Path, manager: Arc<ConfigManager>) -> Subscription<ConfigEvent> {
    let id = TypeId::of::<ConfigEvent>();
    let path = path.to_path_buf();

    Subscription::run_with_id(
        id,
        channel(100, move |output| async move {
            let Some(folder) = path.parent().map(Path::to_path_buf) else {
                error!("Config file path does not have a parent directory, cannot watch for changes");
                return;
            };

            let Some(file_name) = path.file_name().map(OsStr::to_os_string) else {
                error!("Config file path does not have a file name, cannot watch for changes");
                return;
            };

            loop {
                let inotify = match Inotify::init() {
                    Ok(inotify) => inotify,
                    Err(e) => {
                        error!("Failed to initialize inotify: {e}");
                        break;
                    }
                };

                debug!("Watching config file at {path:?}");

                let watch_result = inotify.watches().add(
                    &folder,
                    WatchMask::CREATE
                        | WatchMask::DELETE
                        | WatchMask::MOVE
                        | WatchMask::MODIFY
                        | WatchMask::CLOSE_WRITE,
                );

                if let Err(e) = watch_result {
                    error!("Failed to add watch for {folder:?}: {e}");
                    break;
                }

                let buffer = [0; 1024];
                let stream = match inotify.into_event_stream(buffer) {
                    Ok(stream) => stream,
                    Err(e) => {
                        error!("Failed to create inotify event stream: {e}");
                        break;
                    }
                };

                let event_stream = stream.ready_chunks(10);
                pin_mut!(event_stream);

                let sender_template = output.clone();
                let path_clone = path.clone();
                let manager_clone = Arc::clone(&manager);

                match process_event_batches(event_stream.as_mut(), file_name.as_os_str(), move |event| {
                    let mut sender = sender_template.clone();
                    let path = path_clone.clone();
                    let manager = Arc::clone(&manager_clone);

                    async move { handle_watch_event(&mut sender, &path, event, manager).await }
                })
                .await
                {
                    WatchLoopOutcome::StreamEnded => {
                        info!("Config watch stream closed; restarting the inotify watcher");
                        continue;
                    }
                    WatchLoopOutcome::HandlerClosed => {
                        info!("Config watch handler closed; stopping watcher loop");
                        break;
                    }
                }
            }

            info!("Config watcher terminated");
        }),
    )
}
