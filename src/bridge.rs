//! Adapter between a registry and a presentation layer.
//!
//! The bridge owns no notification state. Each broadcast is handed to a
//! [`Renderer`] grouped by anchor, and every notification first seen as
//! exiting gets one removal timer covering its exit animation. User
//! clicks come back in through [`ObserverBridge::dismiss`].

use crate::core::{NotificationId, PositionGroups, Snapshot};
use crate::registry::{Registry, Subscription};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Presentation layer fed by an [`ObserverBridge`].
pub trait Renderer: Send + Sync {
    /// Draw the current notifications, grouped by screen anchor.
    fn render(&self, groups: &PositionGroups<'_>);
}

impl<F> Renderer for F
where
    F: Fn(&PositionGroups<'_>) + Send + Sync,
{
    fn render(&self, groups: &PositionGroups<'_>) {
        self(groups)
    }
}

/// Live projection of a registry onto a [`Renderer`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use toastline::bridge::ObserverBridge;
/// use toastline::core::{PositionGroups, ToastOptions};
/// use toastline::scheduler::ManualScheduler;
/// use toastline::Registry;
///
/// let clock = ManualScheduler::new();
/// let registry = Registry::with_scheduler(clock.clone());
/// let bridge = ObserverBridge::attach(&registry, |groups: &PositionGroups<'_>| {
///     for (position, stack) in groups {
///         println!("{position}: {} toast(s)", stack.len());
///     }
/// });
///
/// let id = registry.info("Copied", ToastOptions::new());
/// assert!(bridge.dismiss(&id));
/// clock.advance(Duration::from_millis(150));
/// assert!(registry.is_empty());
/// ```
pub struct ObserverBridge {
    registry: Registry,
    subscription: Option<Subscription>,
    removing: Arc<Mutex<HashSet<NotificationId>>>,
}

impl ObserverBridge {
    /// Subscribe `renderer` to `registry`.
    pub fn attach<R>(registry: &Registry, renderer: R) -> Self
    where
        R: Renderer + 'static,
    {
        let removing = Arc::new(Mutex::new(HashSet::new()));
        let listener = {
            let weak = registry.downgrade();
            let scheduler = Arc::clone(registry.scheduler());
            let exit_delay = registry.config().exit_delay();
            let removing = Arc::clone(&removing);

            move |snapshot: &Snapshot| {
                renderer.render(&snapshot.by_position());

                for notification in snapshot.iter().filter(|n| n.is_exiting) {
                    if !removing.lock().insert(notification.id.clone()) {
                        continue;
                    }
                    let weak = weak.clone();
                    let removing = Arc::clone(&removing);
                    let id = notification.id.clone();
                    scheduler.schedule(
                        exit_delay,
                        Box::new(move || {
                            removing.lock().remove(&id);
                            if let Some(registry) = Registry::upgrade(&weak) {
                                registry.remove(&id);
                            }
                        }),
                    );
                }
            }
        };

        Self {
            registry: registry.clone(),
            subscription: Some(registry.subscribe(listener)),
            removing,
        }
    }

    /// Forward a user dismiss click.
    ///
    /// Ignored for notifications that are not dismissible, since no
    /// dismiss affordance was offered for them.
    pub fn dismiss(&self, id: &NotificationId) -> bool {
        let dismissible = self
            .registry
            .snapshot()
            .get(id)
            .is_some_and(|n| n.dismissible);
        if !dismissible {
            debug!(id = %id, "dismiss click ignored");
            return false;
        }
        self.registry.begin_dismiss(id)
    }

    /// Number of exit animations currently waiting to remove a notification.
    pub fn pending_removals(&self) -> usize {
        self.removing.lock().len()
    }

    /// Stop rendering. Removal timers already scheduled still fire.
    pub fn detach(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for ObserverBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverBridge")
            .field("subscription", &self.subscription)
            .field("pending_removals", &self.pending_removals())
            .finish()
    }
}
