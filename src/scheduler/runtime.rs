//! Scheduler backed by the ambient tokio runtime.

use super::{saturating_millis, Scheduler, Sleep, Task};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::warn;

/// Spawns each task onto the tokio runtime current at scheduling time.
///
/// Outside a runtime there is nothing to drive the timer, so the task is
/// dropped with a warning rather than panicking inside `tokio::spawn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let Ok(handle) = Handle::try_current() else {
            warn!(delay_ms = saturating_millis(delay), "no tokio runtime, timer dropped");
            return;
        };
        let sleep = self.sleep(delay);
        handle.spawn(async move {
            sleep.await;
            task();
        });
    }

    fn sleep(&self, delay: Duration) -> Sleep {
        Box::pin(tokio::time::sleep(delay))
    }
}
