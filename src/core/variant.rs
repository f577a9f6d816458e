//! Semantic category and screen anchor of a notification.
//!
//! Both are closed sets of names that renderers key their styling and
//! layout on, so they parse from and print to the exact kebab-case
//! strings used on the wire (`"loading"`, `"top-right"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic category of a notification.
///
/// Determines icon and styling only, except that [`Variant::Loading`]
/// never expires on its own.
///
/// # Example
///
/// ```rust
/// use toastline::core::Variant;
///
/// let variant: Variant = "loading".parse().unwrap();
/// assert_eq!(variant, Variant::Loading);
/// assert!(!variant.expires_by_default());
/// assert!(Variant::Success.expires_by_default());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Success,
    Error,
    Warning,
    Info,
    Loading,
}

impl Variant {
    /// Every variant, in declaration order.
    pub const ALL: [Variant; 5] = [
        Variant::Success,
        Variant::Error,
        Variant::Warning,
        Variant::Info,
        Variant::Loading,
    ];

    /// Wire name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Loading => "loading",
        }
    }

    /// Whether notifications of this variant get an auto-dismiss timer.
    ///
    /// Loading notifications stay until their operation settles, so any
    /// duration supplied for them is ignored.
    pub fn expires_by_default(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown notification variant '{0}'")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

/// One of the six screen anchors notifications are grouped and stacked at.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Position {
    /// Every anchor, top row first.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Wire name of the anchor.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// True for the three anchors along the top edge.
    pub fn is_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown anchor name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown notification position '{0}'")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ParsePositionError(s.to_string()))
    }
}
