//! Free functions against the process-wide registry.
//!
//! These mirror the usual `toast.success(...)` call style for code that
//! does not want to carry a [`Registry`] handle around.
//!
//! The process-wide registry schedules its timers on the tokio runtime
//! current at the call. Called outside a runtime, auto-dismiss and
//! follow-up timers are dropped with a `warn!`, so a notification with a
//! duration stays until it is dismissed by hand. Build a [`Registry`] with
//! a scheduler of your own if that matters.

use crate::core::{NotificationId, PromiseMessages, Snapshot, ToastOptions, Variant};
use crate::registry::{Registry, Subscription};
use std::future::Future;

/// Create a notification of any variant.
pub fn enqueue(
    message: impl Into<String>,
    variant: Variant,
    options: ToastOptions,
) -> NotificationId {
    Registry::global().enqueue(message, variant, options)
}

/// Create a `success` notification.
pub fn success(message: impl Into<String>, options: ToastOptions) -> NotificationId {
    Registry::global().success(message, options)
}

/// Create an `error` notification.
pub fn error(message: impl Into<String>, options: ToastOptions) -> NotificationId {
    Registry::global().error(message, options)
}

/// Create a `warning` notification.
pub fn warning(message: impl Into<String>, options: ToastOptions) -> NotificationId {
    Registry::global().warning(message, options)
}

/// Create an `info` notification.
pub fn info(message: impl Into<String>, options: ToastOptions) -> NotificationId {
    Registry::global().info(message, options)
}

/// Create a non-expiring `loading` notification.
pub fn loading(message: impl Into<String>, options: ToastOptions) -> NotificationId {
    Registry::global().loading(message, options)
}

/// Bind a loading notification to `operation`; see [`Registry::promise`].
pub async fn promise<T, E, F>(
    operation: F,
    messages: PromiseMessages,
    options: ToastOptions,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    Registry::global()
        .promise(operation, messages, options)
        .await
}

/// Dismiss one notification, or every one when `id` is `None`.
pub fn dismiss(id: Option<&NotificationId>) {
    Registry::global().dismiss(id)
}

/// Drop a notification once its exit animation is done.
pub fn remove(id: &NotificationId) -> bool {
    Registry::global().remove(id)
}

/// Receive a snapshot after every change to the process-wide registry.
pub fn subscribe<F>(listener: F) -> Subscription
where
    F: Fn(&Snapshot) + Send + Sync + 'static,
{
    Registry::global().subscribe(listener)
}
