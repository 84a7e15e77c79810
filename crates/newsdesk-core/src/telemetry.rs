//! Logging setup.
//!
//! Console output goes through `tracing-subscriber` in either pretty or JSON
//! form; an optional daily-rotated JSON file log is written through
//! `tracing-appender`.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::NewsdeskResult;
use serde::{Deserialize, Serialize};

/// Console log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name, also used as the log file prefix.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Console log format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Directory for daily-rotated log files. No file log when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_service_name() -> String {
    "newsdesk-api".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            log_dir: None,
        }
    }
}

impl TelemetryConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_directives(&self) -> String {
        format!("{},newsdesk=debug,tower_http=debug", self.log_level)
    }
}

/// Keeps the background log writer alive; drop it on shutdown to flush.
#[derive(Default)]
pub struct TelemetryGuard {
    #[cfg(feature = "telemetry")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize logging with the given configuration.
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> NewsdeskResult<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directives()))
        .map_err(|e| crate::NewsdeskError::Configuration(format!("Invalid log filter: {}", e)))?;

    let console = match config.log_format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
    };

    let (file_layer, file_guard) = match &config.log_dir {
        Some(dir) => {
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::NewsdeskError::Internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );

    Ok(TelemetryGuard {
        _file_guard: file_guard,
    })
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> NewsdeskResult<TelemetryGuard> {
    Ok(TelemetryGuard::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "newsdesk-api");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_default_directives_follow_level() {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::default()
        };
        assert_eq!(config.default_directives(), "warn,newsdesk=debug,tower_http=debug");
    }

    #[test]
    fn test_log_format_deserializes_lowercase() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"log_format":"json"}"#).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
