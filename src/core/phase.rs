//! Lifecycle phase of a notification.
//!
//! A notification moves `Active -> Exiting -> Removed` and never back.
//! The exiting phase is reserved for the exit animation, so removal can
//! never skip it.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a single notification.
///
/// All methods are pure. The registry stores only the `is_exiting` flag;
/// `Phase` is the typed view of that flag plus list membership.
///
/// # Example
///
/// ```rust
/// use toastline::core::Phase;
///
/// assert!(Phase::Active.can_advance_to(Phase::Exiting));
/// assert!(!Phase::Active.can_advance_to(Phase::Removed));
/// assert!(!Phase::Exiting.can_advance_to(Phase::Active));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Visible and counting down (if it has a duration).
    Active,
    /// Marked for removal; the renderer is animating it out.
    Exiting,
    /// Detached from the registry.
    Removed,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Exiting => "Exiting",
            Self::Removed => "Removed",
        }
    }

    /// Whether `next` is the single legal successor of this phase.
    pub fn can_advance_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Exiting) | (Self::Exiting, Self::Removed)
        )
    }
}
