//! Immutable copies of the registry list handed to subscribers.

use super::notification::{Notification, NotificationId};
use super::variant::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notifications grouped by anchor, insertion order kept within a group.
pub type PositionGroups<'a> = BTreeMap<Position, Vec<&'a Notification>>;

/// Ordered copy of every notification in the registry at one instant.
///
/// Insertion order is the default stacking order.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    notifications: Vec<Notification>,
}

impl Snapshot {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.notifications.iter()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| &n.id == id)
    }

    /// Notifications not yet marked as exiting.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| !n.is_exiting)
    }

    /// Partition by screen anchor for layout.
    pub fn by_position(&self) -> PositionGroups<'_> {
        let mut groups: PositionGroups<'_> = BTreeMap::new();
        for notification in &self.notifications {
            groups
                .entry(notification.position)
                .or_default()
                .push(notification);
        }
        groups
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.notifications
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
