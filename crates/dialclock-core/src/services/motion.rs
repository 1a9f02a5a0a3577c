//! Desktop reduced-motion preference, read from the XDG settings portal.

use std::{any::TypeId, ops::Deref};

use iced::{
    Subscription,
    futures::{SinkExt, StreamExt, channel::mpsc::Sender, stream::pending},
    stream::channel,
};
use log::{debug, error, info, warn};

use super::{ReadOnlyService, ServiceEvent};

mod dbus;
mod error;

pub use dbus::{animations_disabled, is_animation_setting};
pub use error::MotionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionData {
    /// `None` when the desktop does not publish a preference.
    pub reduced: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct MotionService {
    data: MotionData,
}

impl Deref for MotionService {
    type Target = MotionData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent(pub bool);

enum State {
    Init,
    Active(zbus::Connection),
    Error,
}

impl MotionService {
    async fn start_listening(
        state: State,
        output: &mut Sender<ServiceEvent<Self>>,
    ) -> Result<State, MotionError> {
        match state {
            State::Init => {
                let conn = zbus::Connection::session().await?;
                let settings = dbus::SettingsDbus::new(&conn).await?;
                let reduced = settings.reduced_motion().await.unwrap_or_else(|err| {
                    warn!("Reduced-motion preference unavailable: {err}");
                    None
                });

                debug!("Initial reduced-motion preference: {reduced:?}");
                let _ = output
                    .send(ServiceEvent::Init(MotionService {
                        data: MotionData { reduced },
                    }))
                    .await;

                Ok(State::Active(conn))
            }
            State::Active(conn) => {
                info!("Listening for reduced-motion changes");
                let settings = dbus::SettingsDbus::new(&conn).await?;
                let mut changes = settings.receive_setting_changed().await?;

                while let Some(signal) = changes.next().await {
                    let args = match signal.args() {
                        Ok(args) => args,
                        Err(err) => {
                            warn!("Malformed SettingChanged signal: {err}");
                            continue;
                        }
                    };

                    if !is_animation_setting(args.namespace(), args.key()) {
                        continue;
                    }

                    match animations_disabled(args.value()) {
                        Some(reduced) => {
                            debug!("Reduced-motion preference changed to {reduced}");
                            let _ = output.send(ServiceEvent::Update(MotionEvent(reduced))).await;
                        }
                        None => {
                            let err = MotionError::unexpected_value(format!("{:?}", args.value()));
                            warn!("{err}");
                        }
                    }
                }

                warn!("Settings portal signal stream ended");
                Ok(State::Init)
            }
            State::Error => {
                error!("Reduced-motion service error");
                let _ = pending::<u8>().next().await;
                Ok(State::Error)
            }
        }
    }
}

impl ReadOnlyService for MotionService {
    type UpdateEvent = MotionEvent;
    type Error = MotionError;

    fn update(&mut self, event: Self::UpdateEvent) {
        self.data.reduced = Some(event.0);
    }

    fn subscribe() -> Subscription<ServiceEvent<Self>> {
        let id = TypeId::of::<Self>();

        Subscription::run_with_id(
            id,
            channel(10, async |mut output| {
                let mut state = State::Init;

                loop {
                    match MotionService::start_listening(state, &mut output).await {
                        Ok(next_state) => {
                            state = next_state;
                        }
                        Err(err) => {
                            error!("Reduced-motion service failure: {err}");
                            let _ = output.send(ServiceEvent::Error(err)).await;
                            state = State::Error;
                        }
                    }
                }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_record_the_latest_preference() {
        let mut service = MotionService {
            data: MotionData::default(),
        };
        assert_eq!(service.reduced, None);

        service.update(MotionEvent(true));
        assert_eq!(service.reduced, Some(true));

        service.update(MotionEvent(false));
        assert_eq!(service.reduced, Some(false));
    }
}
