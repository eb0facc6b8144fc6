//! Interaction configuration.
//!
//! Timing knobs for gates, toggles and recovery boundaries, loaded once at
//! startup from TOML. Every section is optional and falls back to defaults.
//!
//! ```toml
//! [gate]
//! debounce_ms = 300
//! throttle_ms = 300
//!
//! [toggle]
//! duration_ms = 200
//! easing = "exponential_out"
//! frame_interval_ms = 16
//!
//! [boundary]
//! development = true
//! log_capacity = 64
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{ConfigError, ConfigResult};
use crate::gate::GateMode;

/// Top-level configuration for the interaction primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    /// Scheduler gate delays.
    pub gate: GateConfig,
    /// Toggle animation timing.
    pub toggle: ToggleConfig,
    /// Recovery boundary behavior.
    pub boundary: BoundaryConfig,
}

impl InteractionConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`InteractionConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks values that parse but cannot be honored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.toggle.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "toggle.frame_interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.boundary.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "boundary.log_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Delays for debounce and throttle gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Quiet period before a debounced action fires (milliseconds).
    pub debounce_ms: u64,
    /// Minimum spacing between throttled executions (milliseconds).
    pub throttle_ms: u64,
}

impl GateConfig {
    /// Returns the configured delay for `mode`.
    #[must_use]
    pub const fn delay(&self, mode: GateMode) -> Duration {
        match mode {
            GateMode::Debounce => Duration::from_millis(self.debounce_ms),
            GateMode::Throttle => Duration::from_millis(self.throttle_ms),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            throttle_ms: 300,
        }
    }
}

/// Toggle animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToggleConfig {
    /// Duration of a full OFF→ON transition (milliseconds).
    pub duration_ms: u64,
    /// Easing curve applied to each transition segment.
    pub easing: Easing,
    /// Interval between animation frame ticks (milliseconds).
    pub frame_interval_ms: u64,
}

impl ToggleConfig {
    /// Full transition duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Frame tick interval.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 200,
            easing: Easing::ExponentialOut,
            frame_interval_ms: 16,
        }
    }
}

/// Recovery boundary behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryConfig {
    /// Show inline fault detail in the fallback view.
    pub development: bool,
    /// Number of fault records retained by the fault log.
    pub log_capacity: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            development: false,
            log_capacity: 64,
        }
    }
}
