//! Configuration errors.

use thiserror::Error;

/// Errors that can occur when loading or validating registry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Exit delay must be greater than zero")]
    ZeroExitDelay,

    #[error("Loading notifications never expire, got a duration override of {ms}ms")]
    LoadingDuration { ms: u64 },

    /// Config text was not valid JSON for `RegistryConfig`
    #[error("Failed to parse registry config: {0}")]
    Parse(#[from] serde_json::Error),
}
