//! Timer abstraction used for auto-dismissal and follow-up notifications.
//!
//! The registry never talks to a clock directly. It asks a [`Scheduler`]
//! to run a task after a delay, which lets the same code run on tokio's
//! timer in production and on a [`ManualScheduler`] virtual clock in tests.
//!
//! Scheduled tasks are never cancelled. A task whose target is gone by the
//! time it fires must be a no-op.

mod manual;
mod runtime;

pub use self::manual::ManualScheduler;
pub use self::runtime::TokioScheduler;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// One-shot task run by a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Future returned by [`Scheduler::sleep`].
pub type Sleep = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// "Run after delay" and "await a delay" primitives on a single clock.
pub trait Scheduler: Send + Sync {
    /// Run `task` once, `delay` from now.
    fn schedule(&self, delay: Duration, task: Task);

    /// Resolve `delay` from now.
    fn sleep(&self, delay: Duration) -> Sleep;
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
