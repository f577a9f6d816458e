//! The notification record and the options it is created from.

use super::phase::Phase;
use super::variant::{Position, Variant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Opaque identifier of a notification, unique for the registry's lifetime.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Presentation extras forwarded verbatim to the renderer.
///
/// The registry stores these but never looks inside them.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

/// Per-call options. Unset fields fall back to the registry's config.
///
/// # Example
///
/// ```rust
/// use toastline::core::{Position, ToastOptions};
///
/// let options = ToastOptions::new()
///     .duration_ms(1_500)
///     .position(Position::TopCenter)
///     .dismissible(false);
/// assert_eq!(options.duration_ms, Some(1_500));
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToastOptions {
    pub duration_ms: Option<u64>,
    pub position: Option<Position>,
    pub dismissible: Option<bool>,
    /// Secondary text shown under the message.
    pub description: Option<String>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-dismiss after `ms` milliseconds; `0` never expires.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Same as [`ToastOptions::duration_ms`], saturating at `u64::MAX` ms.
    pub fn duration(self, duration: Duration) -> Self {
        self.duration_ms(crate::scheduler::saturating_millis(duration))
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: serde_json::Value) -> Self {
        self.presentation.icon = Some(icon);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.presentation.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.presentation.style.insert(key.into(), value.into());
        self
    }
}

/// Texts shown while an async operation runs and once it settles.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PromiseMessages {
    pub loading: String,
    pub success: String,
    pub error: String,
}

impl PromiseMessages {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// A single toast as seen by subscribers.
///
/// Everything except `is_exiting` is fixed at creation; a resolved
/// async lifecycle creates a new notification instead of mutating one.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: Variant,
    pub position: Position,
    /// `0` means the notification never auto-dismisses.
    pub duration_ms: u64,
    pub dismissible: bool,
    pub created_at: DateTime<Utc>,
    pub is_exiting: bool,
    #[serde(flatten)]
    pub presentation: Presentation,
}

impl Notification {
    /// Current phase while the notification is still in the registry.
    pub fn phase(&self) -> Phase {
        if self.is_exiting {
            Phase::Exiting
        } else {
            Phase::Active
        }
    }

    /// Auto-dismiss delay, `None` for non-expiring notifications.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        (self.duration_ms > 0).then(|| Duration::from_millis(self.duration_ms))
    }
}
