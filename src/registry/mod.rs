//! The notification registry.
//!
//! Owns the authoritative ordered list of notifications, assigns their
//! ids, schedules their auto-dismiss timers and broadcasts a fresh
//! [`Snapshot`] to every subscriber after each state change.
//!
//! All operations are infallible. Acting on an unknown, exiting or removed
//! id is a silent no-op, which is also what makes late timers harmless.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use toastline::core::ToastOptions;
//! use toastline::scheduler::ManualScheduler;
//! use toastline::Registry;
//!
//! let clock = ManualScheduler::new();
//! let registry = Registry::with_scheduler(clock.clone());
//!
//! let id = registry.success("Saved", ToastOptions::new().duration_ms(100));
//! assert!(!registry.snapshot().get(&id).unwrap().is_exiting);
//!
//! clock.advance(Duration::from_millis(100));
//! assert!(registry.snapshot().get(&id).unwrap().is_exiting);
//!
//! registry.remove(&id);
//! assert!(registry.snapshot().is_empty());
//! ```

mod subscription;

pub use subscription::{Listener, Subscription};

use crate::config::RegistryConfig;
use crate::core::{Notification, NotificationId, Phase, Snapshot, ToastOptions, Variant};
use crate::scheduler::{Scheduler, TokioScheduler};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock, Weak};
use subscription::Listeners;
use tracing::{debug, trace, warn};

#[derive(Default)]
pub(crate) struct State {
    pub(crate) notifications: Vec<Notification>,
    pub(crate) listeners: Listeners,
    /// Snapshots committed but not yet delivered, oldest first.
    outbox: VecDeque<Snapshot>,
    /// Set while some caller is draining `outbox`.
    dispatching: bool,
}

/// Clears the dispatching flag when a listener panics mid-broadcast.
struct DispatchGuard<'a> {
    shared: &'a Shared,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.shared.state.lock().dispatching = false;
        }
    }
}

pub(crate) struct Shared {
    pub(crate) config: RegistryConfig,
    pub(crate) scheduler: Arc<dyn Scheduler>,
    pub(crate) state: Mutex<State>,
}

/// Shared handle to a notification registry.
///
/// Clones refer to the same registry. Timers only hold a weak reference,
/// so once every handle is dropped pending timers do nothing.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Registry with default config driven by the tokio runtime.
    pub fn new() -> Self {
        Self::from_parts(RegistryConfig::default(), Arc::new(TokioScheduler))
    }

    /// Registry with default config driven by `scheduler`.
    pub fn with_scheduler(scheduler: impl Scheduler + 'static) -> Self {
        Self::from_parts(RegistryConfig::default(), Arc::new(scheduler))
    }

    /// Assemble a registry from an already validated config.
    pub(crate) fn from_parts(config: RegistryConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                scheduler,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Process-wide default registry, created on first use.
    ///
    /// Its timers run on [`TokioScheduler`]. Outside a tokio runtime an
    /// auto-dismiss or follow-up timer cannot be scheduled: it is dropped
    /// with a `warn!` and that notification stays until dismissed by hand.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.shared.config
    }

    pub(crate) fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.shared.scheduler
    }

    pub(crate) fn downgrade(&self) -> Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    pub(crate) fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Copy of the current list.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.shared.state.lock().notifications.clone())
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a notification and return its id immediately.
    ///
    /// Unset options fall back to the registry config; `loading` always
    /// gets duration `0`. A positive duration schedules exactly one
    /// auto-dismiss timer. Content is not validated.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        variant: Variant,
        options: ToastOptions,
    ) -> NotificationId {
        let config = &self.shared.config;
        let notification = Notification {
            id: NotificationId::generate(),
            message: message.into(),
            description: options.description,
            variant,
            position: options.position.unwrap_or(config.default_position),
            duration_ms: config.duration_for(variant, options.duration_ms),
            dismissible: options.dismissible.unwrap_or(config.default_dismissible),
            created_at: Utc::now(),
            is_exiting: false,
            presentation: options.presentation,
        };
        let id = notification.id.clone();
        let expiry = notification.auto_dismiss_after();
        debug!(id = %id, variant = %variant, position = %notification.position, duration_ms = notification.duration_ms, "enqueue");

        self.commit(|notifications| {
            notifications.push(notification);
            true
        });

        if let Some(delay) = expiry {
            let weak = self.downgrade();
            let target = id.clone();
            self.shared.scheduler.schedule(
                delay,
                Box::new(move || match Registry::upgrade(&weak) {
                    Some(registry) => {
                        registry.begin_dismiss(&target);
                    }
                    None => trace!(id = %target, "auto-dismiss after registry dropped"),
                }),
            );
        }

        id
    }

    pub fn success(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.enqueue(message, Variant::Success, options)
    }

    pub fn error(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.enqueue(message, Variant::Error, options)
    }

    pub fn warning(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.enqueue(message, Variant::Warning, options)
    }

    pub fn info(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.enqueue(message, Variant::Info, options)
    }

    /// Non-expiring notification; any duration in `options` is ignored.
    pub fn loading(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.enqueue(message, Variant::Loading, options)
    }

    /// Mark one notification as exiting.
    ///
    /// Returns `true` if this call made the transition. Unknown, removed
    /// or already exiting ids are ignored without a broadcast.
    pub fn begin_dismiss(&self, id: &NotificationId) -> bool {
        let changed = self.commit(|notifications| {
            match notifications
                .iter_mut()
                .find(|n| &n.id == id && !n.is_exiting)
            {
                Some(notification) => {
                    debug_assert!(notification.phase().can_advance_to(Phase::Exiting));
                    notification.is_exiting = true;
                    true
                }
                None => false,
            }
        });
        if changed {
            debug!(id = %id, "begin dismiss");
        } else {
            trace!(id = %id, "dismiss ignored, not active");
        }
        changed
    }

    /// Dismiss one notification, or all of them when `id` is `None`.
    pub fn dismiss(&self, id: Option<&NotificationId>) {
        match id {
            Some(id) => {
                self.begin_dismiss(id);
            }
            None => {
                self.dismiss_all();
            }
        }
    }

    /// Mark every active notification as exiting with a single broadcast.
    ///
    /// Returns how many notifications changed.
    pub fn dismiss_all(&self) -> usize {
        let mut count = 0;
        self.commit(|notifications| {
            for notification in notifications.iter_mut().filter(|n| !n.is_exiting) {
                notification.is_exiting = true;
                count += 1;
            }
            count > 0
        });
        debug!(count, "dismiss all");
        count
    }

    /// Drop a notification from the list.
    ///
    /// Called by the renderer once the exit animation is done. Unknown ids
    /// are ignored without a broadcast.
    pub fn remove(&self, id: &NotificationId) -> bool {
        let mut from = None;
        let removed = self.commit(|notifications| {
            let index = notifications.iter().position(|n| &n.id == id);
            match index {
                Some(index) => {
                    from = Some(notifications.remove(index).phase());
                    true
                }
                None => false,
            }
        });
        match from {
            Some(phase) if !phase.can_advance_to(Phase::Removed) => {
                warn!(id = %id, from = phase.name(), "removed without exit animation");
            }
            Some(phase) => debug!(id = %id, from = phase.name(), "removed"),
            None => {}
        }
        removed
    }

    /// Register `listener` for every later state change.
    ///
    /// The listener is not called with the current list; use
    /// [`Registry::snapshot`] for that.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.shared.state.lock().listeners.insert(Arc::new(listener));
        Subscription {
            id,
            shared: self.downgrade(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().listeners.len()
    }

    /// Apply `mutate` under the lock and broadcast if it reports a change.
    ///
    /// Snapshots are queued in commit order and delivered by whichever
    /// caller is not already dispatching. A listener that calls back into
    /// the registry only queues its snapshot, so every listener sees the
    /// changes in the order they happened and the last snapshot delivered
    /// always matches the registry. Listeners run without the lock held.
    fn commit<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut Vec<Notification>) -> bool,
    {
        {
            let mut state = self.shared.state.lock();
            if !mutate(&mut state.notifications) {
                return false;
            }
            let snapshot = Snapshot::new(state.notifications.clone());
            state.outbox.push_back(snapshot);
            if state.dispatching {
                trace!(queued = state.outbox.len(), "broadcast queued");
                return true;
            }
            state.dispatching = true;
        }

        let _guard = DispatchGuard {
            shared: &self.shared,
        };
        loop {
            let (snapshot, listeners) = {
                let mut state = self.shared.state.lock();
                match state.outbox.pop_front() {
                    Some(snapshot) => (snapshot, state.listeners.collect()),
                    None => {
                        state.dispatching = false;
                        break;
                    }
                }
            };
            trace!(listeners = listeners.len(), size = snapshot.len(), "broadcast");
            for listener in listeners {
                listener(&snapshot);
            }
        }
        true
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Registry")
            .field("config", &self.shared.config)
            .field("notifications", &state.notifications.len())
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, Position};
    use crate::scheduler::ManualScheduler;
    use std::collections::HashSet;
    use std::time::Duration;

    fn registry() -> (Registry, ManualScheduler) {
        let clock = ManualScheduler::new();
        (Registry::with_scheduler(clock.clone()), clock)
    }

    fn recorder(registry: &Registry) -> (Arc<Mutex<Vec<Snapshot>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = registry.subscribe(move |snapshot| sink.lock().push(snapshot.clone()));
        (seen, subscription)
    }

    #[test]
    fn enqueue_applies_config_defaults() {
        let (registry, _) = registry();
        let id = registry.info("hello", ToastOptions::new());

        let snapshot = registry.snapshot();
        let notification = snapshot.get(&id).unwrap();
        assert_eq!(notification.message, "hello");
        assert_eq!(notification.variant, Variant::Info);
        assert_eq!(notification.position, Position::BottomRight);
        assert_eq!(notification.duration_ms, 4000);
        assert!(notification.dismissible);
        assert_eq!(notification.phase(), Phase::Active);
    }

    #[test]
    fn enqueue_keeps_per_call_options_and_payload() {
        let (registry, _) = registry();
        let id = registry.warning(
            "",
            ToastOptions::new()
                .position(Position::TopLeft)
                .dismissible(false)
                .class_name("pinned")
                .style("width", "20rem"),
        );

        let snapshot = registry.snapshot();
        let notification = snapshot.get(&id).unwrap();
        assert_eq!(notification.message, "");
        assert_eq!(notification.position, Position::TopLeft);
        assert!(!notification.dismissible);
        assert_eq!(
            notification.presentation.class_name.as_deref(),
            Some("pinned")
        );
        assert_eq!(notification.presentation.style["width"], "20rem");
    }

    #[test]
    fn enqueue_preserves_insertion_order() {
        let (registry, _) = registry();
        let ids: Vec<_> = (0..5)
            .map(|i| registry.info(format!("n{i}"), ToastOptions::new()))
            .collect();
        let listed: Vec<_> = registry.snapshot().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, listed);
    }

    #[test]
    fn ids_are_unique_across_rapid_enqueues() {
        let (registry, _) = registry();
        let ids: HashSet<_> = (0..1000)
            .map(|_| registry.success("x", ToastOptions::new()))
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn enqueue_broadcasts_full_list() {
        let (registry, _) = registry();
        let (seen, _sub) = recorder(&registry);

        registry.info("a", ToastOptions::new());
        registry.info("b", ToastOptions::new());

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[1].len(), 2);
    }

    #[test]
    fn auto_dismiss_marks_exiting_after_duration() {
        let (registry, clock) = registry();
        let id = registry.info("tick", ToastOptions::new().duration_ms(100));

        clock.advance(Duration::from_millis(99));
        assert!(!registry.snapshot().get(&id).unwrap().is_exiting);

        clock.advance(Duration::from_millis(1));
        assert!(registry.snapshot().get(&id).unwrap().is_exiting);
    }

    #[test]
    fn zero_duration_schedules_no_timer() {
        let (registry, clock) = registry();
        registry.info("sticky", ToastOptions::new().duration_ms(0));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn loading_ignores_duration_and_never_expires() {
        let (registry, clock) = registry();
        let id = registry.loading("working", ToastOptions::new().duration_ms(100));

        assert_eq!(clock.pending(), 0);
        clock.advance(Duration::from_secs(3600));

        let snapshot = registry.snapshot();
        let notification = snapshot.get(&id).unwrap();
        assert_eq!(notification.duration_ms, 0);
        assert!(!notification.is_exiting);
    }

    #[test]
    fn begin_dismiss_transitions_once() {
        let (registry, _) = registry();
        let id = registry.info("once", ToastOptions::new());
        let (seen, _sub) = recorder(&registry);

        assert!(registry.begin_dismiss(&id));
        assert!(!registry.begin_dismiss(&id));

        assert_eq!(seen.lock().len(), 1);
        assert!(registry.snapshot().get(&id).unwrap().is_exiting);
    }

    #[test]
    fn begin_dismiss_unknown_id_is_silent() {
        let (registry, _) = registry();
        registry.info("a", ToastOptions::new());
        let (seen, _sub) = recorder(&registry);

        assert!(!registry.begin_dismiss(&NotificationId::from("missing")));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn dismiss_all_broadcasts_once_with_everything_marked() {
        let (registry, _) = registry();
        let first = registry.info("a", ToastOptions::new());
        registry.info("b", ToastOptions::new());
        registry.info("c", ToastOptions::new());
        registry.begin_dismiss(&first);
        let (seen, _sub) = recorder(&registry);

        assert_eq!(registry.dismiss_all(), 2);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].iter().all(|n| n.is_exiting));
    }

    #[test]
    fn dismiss_all_with_nothing_active_does_not_broadcast() {
        let (registry, _) = registry();
        let (seen, _sub) = recorder(&registry);
        assert_eq!(registry.dismiss_all(), 0);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn dismiss_dispatches_on_optional_id() {
        let (registry, _) = registry();
        let a = registry.info("a", ToastOptions::new());
        let b = registry.info("b", ToastOptions::new());

        registry.dismiss(Some(&a));
        let snapshot = registry.snapshot();
        assert!(snapshot.get(&a).unwrap().is_exiting);
        assert!(!snapshot.get(&b).unwrap().is_exiting);

        registry.dismiss(None);
        assert!(registry.snapshot().iter().all(|n| n.is_exiting));
    }

    #[test]
    fn remove_drops_notification_and_broadcasts() {
        let (registry, _) = registry();
        let id = registry.info("a", ToastOptions::new());
        let (seen, _sub) = recorder(&registry);

        assert!(registry.remove(&id));
        assert!(registry.is_empty());
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn remove_unknown_id_leaves_state_and_broadcasts_unchanged() {
        let (registry, _) = registry();
        registry.info("a", ToastOptions::new());
        let (seen, _sub) = recorder(&registry);

        assert!(!registry.remove(&NotificationId::from("ghost")));
        assert_eq!(registry.len(), 1);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn timer_after_manual_removal_is_a_noop() {
        let (registry, clock) = registry();
        let id = registry.info("short", ToastOptions::new().duration_ms(100));
        registry.begin_dismiss(&id);
        registry.remove(&id);
        let (seen, _sub) = recorder(&registry);

        clock.advance(Duration::from_millis(100));
        assert!(seen.lock().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn timer_after_registry_dropped_is_a_noop() {
        let (registry, clock) = registry();
        registry.info("orphan", ToastOptions::new().duration_ms(10));
        drop(registry);
        clock.advance(Duration::from_millis(10));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn unsubscribe_stops_callbacks() {
        let (registry, _) = registry();
        let (seen, subscription) = recorder(&registry);

        registry.info("a", ToastOptions::new());
        assert!(subscription.is_active());
        subscription.unsubscribe();
        registry.info("b", ToastOptions::new());

        assert_eq!(seen.lock().len(), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn late_subscriber_can_request_current_snapshot() {
        let (registry, _) = registry();
        for i in 0..3 {
            registry.info(format!("{i}"), ToastOptions::new());
        }
        let (seen, _sub) = recorder(&registry);

        assert!(seen.lock().is_empty());
        assert_eq!(registry.snapshot().len(), 3);
    }

    #[test]
    fn every_subscriber_receives_each_change() {
        let (registry, _) = registry();
        let (first, _a) = recorder(&registry);
        let (second, _b) = recorder(&registry);

        let id = registry.info("a", ToastOptions::new());
        registry.begin_dismiss(&id);

        assert_eq!(first.lock().len(), 2);
        assert_eq!(second.lock().len(), 2);
    }

    #[test]
    fn listener_may_call_back_into_registry() {
        let (registry, _) = registry();
        let handle = registry.clone();
        let _sub = registry.subscribe(move |snapshot| {
            for notification in snapshot.iter().filter(|n| n.is_exiting) {
                handle.remove(&notification.id);
            }
        });

        let id = registry.info("bounce", ToastOptions::new());
        registry.begin_dismiss(&id);
        assert!(registry.is_empty());
    }

    #[test]
    fn nested_commit_is_delivered_after_outer_snapshot() {
        let (registry, _) = registry();
        let handle = registry.clone();
        let _remover = registry.subscribe(move |snapshot| {
            for notification in snapshot.iter().filter(|n| n.is_exiting) {
                handle.remove(&notification.id);
            }
        });
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sizes);
        let _observer = registry.subscribe(move |snapshot| sink.lock().push(snapshot.len()));

        let id = registry.info("x", ToastOptions::new());
        registry.begin_dismiss(&id);

        assert!(registry.is_empty());
        assert_eq!(*sizes.lock(), vec![1, 1, 0]);
    }

    #[test]
    fn every_listener_sees_changes_in_commit_order() {
        let (registry, _) = registry();
        let handle = registry.clone();
        let _chain = registry.subscribe(move |snapshot| {
            if snapshot.len() < 3 {
                handle.info("more", ToastOptions::new());
            }
        });
        let (seen, _sub) = recorder(&registry);

        registry.info("first", ToastOptions::new());

        let sizes: Vec<_> = seen.lock().iter().map(Snapshot::len).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn panicking_listener_does_not_stall_later_broadcasts() {
        let (registry, _) = registry();
        let panicker = registry.subscribe(|_| panic!("renderer crashed"));
        let (seen, _sub) = recorder(&registry);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.info("a", ToastOptions::new());
        }));
        assert!(result.is_err());

        panicker.unsubscribe();
        registry.info("b", ToastOptions::new());
        assert_eq!(seen.lock().last().map(Snapshot::len), Some(2));
    }

    #[test]
    fn removing_active_notification_still_drops_it() {
        let (registry, _) = registry();
        let id = registry.info("a", ToastOptions::new());
        assert!(registry.remove(&id));
        assert!(registry.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let (registry, _) = registry();
        let other = registry.clone();
        other.info("shared", ToastOptions::new());
        assert_eq!(registry.len(), 1);
    }
}
