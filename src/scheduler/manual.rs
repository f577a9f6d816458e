//! Test-controlled virtual clock.

use super::{Scheduler, Sleep, Task};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Clock {
    /// Remove and return the earliest task due at or before `limit`.
    fn pop_due(&mut self, limit: Duration) -> Option<Pending> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= limit)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(index))
    }
}

/// Scheduler whose time only moves when [`ManualScheduler::advance`] is called.
///
/// Clones share the same clock, so a test can keep one handle and give
/// another to the registry.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use toastline::scheduler::{ManualScheduler, Scheduler};
///
/// let clock = ManualScheduler::new();
/// let runs = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&runs);
/// clock.schedule(Duration::from_millis(50), Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// clock.advance(Duration::from_millis(49));
/// assert_eq!(runs.load(Ordering::SeqCst), 0);
/// clock.advance(Duration::from_millis(1));
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of tasks not yet run.
    pub fn pending(&self) -> usize {
        self.clock.lock().pending.len()
    }

    /// Move the clock forward by `by`, running every task that comes due.
    ///
    /// Tasks run in due-time order (ties in scheduling order) with the
    /// clock set to their due time. Tasks scheduled while advancing run in
    /// the same call if they fall inside the window. The clock lock is not
    /// held while a task runs.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.lock().now + by;
        loop {
            let next = {
                let mut clock = self.clock.lock();
                let next = clock.pop_due(target);
                if let Some(pending) = &next {
                    clock.now = pending.due;
                }
                next
            };
            match next {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
        self.clock.lock().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut clock = self.clock.lock();
        let due = clock.now + delay;
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.pending.push(Pending { due, seq, task });
    }

    fn sleep(&self, delay: Duration) -> Sleep {
        let (tx, rx) = oneshot::channel();
        self.schedule(
            delay,
            Box::new(move || {
                let _ = tx.send(());
            }),
        );
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}
