//! Toastline: an observable registry of transient notifications
//!
//! Toastline keeps the authoritative list of "toast" messages an
//! application is showing, dismisses them on a timer or on request, and
//! broadcasts every change to subscribers that render them.
//!
//! # Core Concepts
//!
//! - **Registry**: Owns the list, assigns ids, schedules auto-dismissal
//! - **Phase**: Each notification moves `Active -> Exiting -> Removed`, never back
//! - **Scheduler**: Timers run on tokio or on a test-controlled virtual clock
//! - **Promise**: A loading toast bound to an async operation's outcome
//! - **Bridge**: Projects snapshots onto a renderer, grouped by position
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use toastline::core::{ToastOptions, Variant};
//! use toastline::scheduler::ManualScheduler;
//! use toastline::Registry;
//!
//! let clock = ManualScheduler::new();
//! let registry = Registry::with_scheduler(clock.clone());
//!
//! let _subscription = registry.subscribe(|snapshot| {
//!     println!("{} notification(s)", snapshot.len());
//! });
//!
//! let id = registry.enqueue("Profile updated", Variant::Success, ToastOptions::new());
//! clock.advance(Duration::from_millis(4000));
//! assert!(registry.snapshot().get(&id).unwrap().is_exiting);
//! ```

pub mod bridge;
pub mod config;
pub mod core;
mod lifecycle;
pub mod registry;
pub mod scheduler;
pub mod toast;

// Re-export commonly used types
pub use crate::bridge::{ObserverBridge, Renderer};
pub use crate::config::{ConfigError, RegistryBuilder, RegistryConfig};
pub use crate::core::{
    Notification, NotificationId, Position, PromiseMessages, Snapshot, ToastOptions, Variant,
};
pub use crate::registry::{Registry, Subscription};
