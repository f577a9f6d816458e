//! Registry configuration.
//!
//! Deployment-wide defaults applied to every enqueue call that does not
//! override them. A config can be built in code through
//! [`RegistryBuilder`] or deserialized from JSON.
//!
//! # Example
//!
//! ```rust
//! use toastline::config::RegistryConfig;
//! use toastline::core::{Position, Variant};
//!
//! let config = RegistryConfig::from_json(
//!     r#"{"default_position": "top-right", "variant_durations_ms": {"error": 3000}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.default_position, Position::TopRight);
//! assert_eq!(config.duration_for(Variant::Error, None), 3000);
//! assert_eq!(config.duration_for(Variant::Info, None), 4000);
//! assert_eq!(config.duration_for(Variant::Loading, Some(500)), 0);
//! ```

pub mod builder;
pub mod error;

pub use builder::RegistryBuilder;
pub use error::ConfigError;

use crate::core::{Position, Variant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Auto-dismiss delay applied when neither the call nor a variant override sets one.
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Length of the exit animation between "exiting" and removal.
pub const DEFAULT_EXIT_DELAY_MS: u64 = 150;

/// Defaults applied by a registry.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Auto-dismiss delay for expiring variants without an override
    pub default_duration_ms: u64,

    /// Per-variant auto-dismiss delay overrides
    pub variant_durations_ms: BTreeMap<Variant, u64>,

    /// Anchor used when a call does not pick one
    pub default_position: Position,

    /// Whether notifications offer a manual-dismiss affordance by default
    pub default_dismissible: bool,

    /// Exit animation interval; also the gap before an async follow-up
    pub exit_delay_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            variant_durations_ms: BTreeMap::new(),
            default_position: Position::default(),
            default_dismissible: true,
            exit_delay_ms: DEFAULT_EXIT_DELAY_MS,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exit_delay_ms == 0 {
            return Err(ConfigError::ZeroExitDelay);
        }
        if let Some(&ms) = self.variant_durations_ms.get(&Variant::Loading) {
            return Err(ConfigError::LoadingDuration { ms });
        }
        Ok(())
    }

    /// Resolve the effective duration for a new notification.
    ///
    /// Loading always resolves to `0`, whatever was requested.
    pub fn duration_for(&self, variant: Variant, requested: Option<u64>) -> u64 {
        if !variant.expires_by_default() {
            return 0;
        }
        requested
            .or_else(|| self.variant_durations_ms.get(&variant).copied())
            .unwrap_or(self.default_duration_ms)
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}
