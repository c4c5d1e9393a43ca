//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery, environment
//! detection, and merging of file and environment variable sources.

use super::error::{ConfigResult, ConfigurationError};
use super::ClientConfig;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Base name of configuration files (`workflow-client.toml`, `workflow-client.test.toml`, ...)
pub const CONFIG_FILE_STEM: &str = "workflow-client";

/// Default prefix for environment variable overrides
pub const DEFAULT_ENV_PREFIX: &str = "WORKFLOW_CLIENT";

/// Where and how to look for configuration
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory holding configuration files (None = `./config`)
    pub config_directory: Option<PathBuf>,
    /// Environment override (None = auto-detect)
    pub environment: Option<String>,
    /// Prefix for environment variable overrides, e.g. `WORKFLOW_CLIENT__WAIT__DEFAULT_TIMEOUT_MS`
    pub env_prefix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config_directory: None,
            environment: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

/// Loaded, validated configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: ClientConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with(LoadOptions::default())
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with(LoadOptions {
            config_directory: config_dir,
            environment: Some(environment.to_string()),
            ..LoadOptions::default()
        })
    }

    /// Load configuration using explicit options
    pub fn load_with(options: LoadOptions) -> ConfigResult<Arc<ConfigManager>> {
        let environment = options
            .environment
            .unwrap_or_else(Self::detect_environment);
        let config_directory = options
            .config_directory
            .unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, &environment, &options.env_prefix)?;
        config.validate()?;

        crate::log_config!(debug, "Configuration loaded",
            environment: environment,
            default_filter: config.history.default_filter,
            default_timeout_ms: config.wait.default_timeout_ms
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
            config_directory,
        }))
    }

    /// Build a manager around an already constructed configuration
    pub fn from_config(config: ClientConfig, environment: &str) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory: Self::default_config_directory(),
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the current environment from environment variables
    pub fn detect_environment() -> String {
        env::var("WORKFLOW_CLIENT_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        PathBuf::from("config")
    }

    /// Merge base file, environment overlay and environment variables, in that order
    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
        env_prefix: &str,
    ) -> ConfigResult<ClientConfig> {
        let base_path = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let overlay_path = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            base = %base_path.display(),
            overlay = %overlay_path.display(),
            "Resolved configuration file locations"
        );

        let merged = Config::builder()
            .add_source(File::from(base_path).required(false))
            .add_source(File::from(overlay_path).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigurationError::load_error(environment, e))?;

        merged
            .try_deserialize::<ClientConfig>()
            .map_err(ConfigurationError::deserialization_error)
    }
}
