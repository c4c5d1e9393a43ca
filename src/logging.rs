//! # Tracing Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//!
//! This module provides:
//! - Console logging with optional JSON output (container-friendly)
//! - Environment-based log level configuration
//! - Domain-specific structured logging macros
//! - TTY-aware ANSI color output

use crate::config::{ConfigManager, LoggingConfig};
use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console tracing using environment defaults
///
/// Safe to call more than once; only the first call installs a subscriber, and an
/// already-installed global subscriber (e.g. from a host application) is left alone.
pub fn init_tracing() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize console tracing honoring a loaded [`LoggingConfig`]
pub fn init_with_config(config: &LoggingConfig) {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment));

        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let (console_layer, json_layer) = if config.json {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_current_span(true);
            (None, Some(layer))
        } else {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi);
            (Some(layer), None)
        };

        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(&log_level))
            .with(console_layer)
            .with(json_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                json = config.json,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

/// Get log level based on environment variables or environment defaults
fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Timestamp attached by the logging macros
#[doc(hidden)]
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Log history assembly operations
#[macro_export]
macro_rules! log_history {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %$crate::logging::timestamp(),
            "HISTORY_{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %$crate::logging::timestamp(),
            "HISTORY_{}", $operation
        );
    };
}

/// Log bounded wait operations
#[macro_export]
macro_rules! log_wait {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %$crate::logging::timestamp(),
            "WAIT_{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %$crate::logging::timestamp(),
            "WAIT_{}", $operation
        );
    };
}

/// Log configuration operations
#[macro_export]
macro_rules! log_config {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %$crate::logging::timestamp(),
            "{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %$crate::logging::timestamp(),
            "{}", $operation
        );
    };
}
