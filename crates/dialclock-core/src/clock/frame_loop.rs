use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// Shared flag flipped once when a widget instance is torn down.
///
/// Every asynchronous continuation the widget schedules holds a clone and
/// checks it before acting, so cancellation is observed even by work that
/// was already in flight.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One accepted tick of the update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub at:    Instant,
    /// Time since the previous accepted frame; zero for the first one.
    pub delta: Duration,
}

/// Display-synchronised repeating task.
///
/// The host delivers one call to [`FrameLoop::accept`] per rendered frame and
/// keeps requesting frames while [`FrameLoop::is_running`] holds. The token is
/// checked before every frame is accepted, so nothing ticks after
/// cancellation even if the host had already queued a frame.
#[derive(Debug)]
pub struct FrameLoop {
    token:      CancelToken,
    last_frame: Option<Instant>,
}

impl FrameLoop {
    pub fn start(token: CancelToken) -> Self {
        Self {
            token,
            last_frame: None,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn accept(&mut self, at: Instant) -> Option<Frame> {
        if self.token.is_cancelled() {
            return None;
        }

        let delta = self
            .last_frame
            .map(|last| at.saturating_duration_since(last))
            .unwrap_or_default();

        self.last_frame = Some(at);

        Some(Frame { at, delta })
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Waits for `delay` and yields `value` unless `token` was cancelled meanwhile.
pub fn deferred<T>(delay: Duration, token: CancelToken, value: T) -> impl Future<Output = Option<T>> {
    async move {
        tokio::time::sleep(delay).await;

        if token.is_cancelled() { None } else { Some(value) }
    }
}
