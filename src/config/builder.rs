//! Builder for constructing registries.

use crate::config::error::ConfigError;
use crate::config::RegistryConfig;
use crate::core::{Position, Variant};
use crate::registry::Registry;
use crate::scheduler::{saturating_millis, Scheduler, TokioScheduler};
use std::sync::Arc;
use std::time::Duration;

/// Builder for a [`Registry`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use toastline::config::RegistryBuilder;
/// use toastline::core::{Position, Variant};
/// use toastline::scheduler::ManualScheduler;
///
/// let registry = RegistryBuilder::new()
///     .default_duration(Duration::from_secs(3))
///     .variant_duration(Variant::Error, Duration::from_secs(6))
///     .default_position(Position::TopRight)
///     .scheduler(ManualScheduler::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.config().default_position, Position::TopRight);
/// ```
pub struct RegistryBuilder {
    config: RegistryConfig,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::from_config(RegistryConfig::default())
    }

    /// Start from an existing config, e.g. one loaded from JSON.
    pub fn from_config(config: RegistryConfig) -> Self {
        Self {
            config,
            scheduler: None,
        }
    }

    /// Set the fallback auto-dismiss delay
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.config.default_duration_ms = saturating_millis(duration);
        self
    }

    /// Override the auto-dismiss delay for one variant
    pub fn variant_duration(mut self, variant: Variant, duration: Duration) -> Self {
        self.config
            .variant_durations_ms
            .insert(variant, saturating_millis(duration));
        self
    }

    pub fn default_position(mut self, position: Position) -> Self {
        self.config.default_position = position;
        self
    }

    pub fn default_dismissible(mut self, dismissible: bool) -> Self {
        self.config.default_dismissible = dismissible;
        self
    }

    /// Set the exit animation interval
    pub fn exit_delay(mut self, delay: Duration) -> Self {
        self.config.exit_delay_ms = saturating_millis(delay);
        self
    }

    /// Drive timers with `scheduler` instead of the tokio runtime
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Arc::new(scheduler));
        self
    }

    /// Build the registry.
    /// Returns an error if the config is inconsistent.
    pub fn build(self) -> Result<Registry, ConfigError> {
        self.config.validate()?;
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(TokioScheduler::new()));
        Ok(Registry::from_parts(self.config, scheduler))
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ToastOptions;
    use crate::scheduler::ManualScheduler;

    #[test]
    fn builder_applies_defaults_to_enqueue() {
        let registry = RegistryBuilder::new()
            .default_duration(Duration::from_millis(3000))
            .variant_duration(Variant::Error, Duration::from_millis(5000))
            .default_position(Position::TopCenter)
            .default_dismissible(false)
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();

        let info = registry.info("i", ToastOptions::new());
        let error = registry.error("e", ToastOptions::new());
        let snapshot = registry.snapshot();

        let info = snapshot.get(&info).unwrap();
        assert_eq!(info.duration_ms, 3000);
        assert_eq!(info.position, Position::TopCenter);
        assert!(!info.dismissible);
        assert_eq!(snapshot.get(&error).unwrap().duration_ms, 5000);
    }

    #[test]
    fn custom_exit_delay_is_kept() {
        let registry = RegistryBuilder::new()
            .exit_delay(Duration::from_millis(300))
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        assert_eq!(registry.config().exit_delay(), Duration::from_millis(300));
    }

    #[test]
    fn zero_exit_delay_fails_to_build() {
        let result = RegistryBuilder::new().exit_delay(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::ZeroExitDelay)));
    }

    #[test]
    fn loading_duration_override_fails_to_build() {
        let result = RegistryBuilder::new()
            .variant_duration(Variant::Loading, Duration::from_secs(1))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::LoadingDuration { ms: 1000 })
        ));
    }

    #[test]
    fn from_config_starts_from_loaded_values() {
        let config = RegistryConfig::from_json(r#"{"default_position": "top-left"}"#).unwrap();
        let registry = RegistryBuilder::from_config(config)
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        assert_eq!(registry.config().default_position, Position::TopLeft);
    }
}
