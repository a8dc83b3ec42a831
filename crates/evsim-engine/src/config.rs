//! Simulator configuration and validation.
//!
//! [`SimulatorConfig`] is the constructor input for
//! [`Simulator::with_config()`](crate::simulator::Simulator::with_config).
//! [`validate()`](SimulatorConfig::validate) checks structural invariants
//! before any allocation happens.

use evsim_core::ConfigError;

/// Largest accepted [`SimulatorConfig::queue_capacity`].
pub const MAX_QUEUE_CAPACITY: usize = 1 << 24;

/// Construction-time settings for a simulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Label attached to every log record emitted by this simulator, so
    /// that independent simulations in one process can be told apart.
    /// Default: `"sim"`.
    pub name: String,
    /// Number of events the queue pre-allocates room for. Purely a
    /// performance hint; the queue grows as needed. Default: 64.
    pub queue_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            name: "sim".to_string(),
            queue_capacity: 64,
        }
    }
}

impl SimulatorConfig {
    /// Config with the given name and default capacity.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::QueueCapacityTooLarge {
                configured: self.queue_capacity,
                max: MAX_QUEUE_CAPACITY,
            });
        }
        Ok(())
    }
}
