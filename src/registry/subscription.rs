//! Observer list of a registry.

use crate::core::Snapshot;
use std::sync::{Arc, Weak};

use super::Shared;

/// Callback receiving the full list after every state change.
pub type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Listeners {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clone the current callbacks so they can run without the registry lock.
    pub(crate) fn collect(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Handle returned by [`Registry::subscribe`](super::Registry::subscribe).
///
/// Dropping the handle leaves the listener registered; call
/// [`Subscription::unsubscribe`] to stop receiving snapshots.
pub struct Subscription {
    pub(crate) id: u64,
    pub(crate) shared: Weak<Shared>,
}

impl Subscription {
    /// Deregister the listener. Broadcasts that start afterwards skip it.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.state.lock().listeners.remove(self.id);
        }
    }

    /// Whether the listener is still registered with a live registry.
    pub fn is_active(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let registered = shared.state.lock().listeners.contains(self.id);
        registered
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
