//! Input settling: delay a "query committed" dispatch until input has been
//! quiet for a fixed interval.
//!
//! The timer itself lives behind the [`Scheduler`] port. The debouncer only
//! ever hands the payload to its sink; the sink is expected to post into the
//! control loop's event queue rather than touch view-model state directly.

use std::{fmt, sync::Arc, time::Duration};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::trace;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A scheduled action that may be cancelled before it fires.
pub trait TimerHandle {
    fn cancel(&self);

    /// `true` until the action has run or been cancelled.
    fn is_pending(&self) -> bool;
}

/// Runs an action once after a delay.
pub trait Scheduler {
    type Handle: TimerHandle;

    fn after(&self, delay: Duration, action: Box<dyn FnOnce() + Send + 'static>) -> Self::Handle;
}

/// [`Scheduler`] backed by the tokio timer wheel.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Binds to the runtime the caller is running on.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

#[derive(Debug)]
pub struct TokioTimer(JoinHandle<()>);

impl TimerHandle for TokioTimer {
    fn cancel(&self) {
        self.0.abort();
    }

    fn is_pending(&self) -> bool {
        !self.0.is_finished()
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn after(&self, delay: Duration, action: Box<dyn FnOnce() + Send + 'static>) -> TokioTimer {
        TokioTimer(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }))
    }
}

/// Collapses bursts of `schedule` calls into a single dispatch of the last
/// payload.
///
/// States are Idle (`pending` is `None` or its timer already fired) and
/// Pending. A new `schedule` cancels the pending timer, so a superseded
/// payload is never dispatched. Dropping the debouncer cancels any pending
/// timer.
pub struct Debouncer<P, S: Scheduler> {
    scheduler: S,
    delay: Duration,
    sink: Arc<dyn Fn(P) + Send + Sync>,
    pending: Option<S::Handle>,
}

impl<P, S> Debouncer<P, S>
where
    P: Send + 'static,
    S: Scheduler,
{
    pub fn new<F>(scheduler: S, delay: Duration, sink: F) -> Self
    where
        F: Fn(P) + Send + Sync + 'static,
    {
        Self { scheduler, delay, sink: Arc::new(sink), pending: None }
    }

    pub fn schedule(&mut self, payload: P) {
        self.cancel();

        let sink = Arc::clone(&self.sink);
        let handle = self.scheduler.after(self.delay, Box::new(move || sink(payload)));
        self.pending = Some(handle);
    }
}

impl<P, S: Scheduler> Debouncer<P, S> {
    /// Drops the pending payload, if any, without dispatching it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if handle.is_pending() {
                trace!("debounced payload superseded");
            }
            handle.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| handle.is_pending())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<P, S: Scheduler> Drop for Debouncer<P, S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<P, S: Scheduler> fmt::Debug for Debouncer<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
