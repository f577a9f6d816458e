//! Core notification types.
//!
//! This module contains the plain data of the registry:
//! - Notification records and the options they are built from
//! - Variant and position enums with their wire names
//! - The lifecycle phase and its legal transitions
//! - Snapshots handed to subscribers
//!
//! Nothing here schedules timers or performs I/O.

mod notification;
mod phase;
mod snapshot;
mod variant;

pub use notification::{Notification, NotificationId, Presentation, PromiseMessages, ToastOptions};
pub use phase::Phase;
pub use snapshot::{PositionGroups, Snapshot};
pub use variant::{ParsePositionError, ParseVariantError, Position, Variant};
