//! # Client Configuration
//!
//! Layered configuration for the shared client utilities. Values come from built-in
//! defaults, an optional base file, an optional environment overlay file and finally
//! prefixed environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use workflow_client_common::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//!
//! let timeout = manager.config().wait.default_timeout();
//! let filter = manager.config().history.default_filter;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::history::HistoryEventFilterType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{ConfigManager, LoadOptions};

/// Root configuration for the client utilities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub history: HistoryConfig,
    pub wait: WaitConfig,
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Reject values that would make the utilities misbehave at runtime
    pub fn validate(&self) -> ConfigResult<()> {
        if self.wait.default_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "wait.default_timeout_ms",
                "0",
                "default wait timeout must be greater than zero",
            ));
        }

        if let Some(level) = &self.logging.level {
            if level.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    "logging.level",
                    level.clone(),
                    "log level override must not be blank",
                ));
            }
        }

        Ok(())
    }
}

/// History assembly settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Filter applied by `HistoryAssembler::assemble_default`
    pub default_filter: HistoryEventFilterType,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_filter: HistoryEventFilterType::AllEvent,
        }
    }
}

/// Bounded wait settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    pub default_timeout_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 30_000,
        }
    }
}

impl WaitConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

/// Logging settings consumed by `logging::init_with_config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive overriding the environment default (e.g. `info` or `workflow_client_common=trace`)
    pub level: Option<String>,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}
