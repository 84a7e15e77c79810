//! Configuration validation module.
//!
//! Every problem is collected so a bad deployment reports all of them at
//! startup instead of failing on the first request.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { value: u16 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Duration value must be positive.
    NonPositiveDuration { name: String },
    /// Pool size is zero or too large.
    InvalidPoolSize { value: usize, maximum: usize },
    /// Rate limit quota must be positive.
    InvalidRateLimit { max_requests: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// CORS origin is neither `*` nor an http(s) origin.
    InvalidCorsOrigin { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { value } => {
                write!(f, "Invalid server port: {} (must be 1-65535)", value)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "'{}' must be positive", name)
            }
            Self::InvalidPoolSize { value, maximum } => {
                write!(f, "Invalid pool size: {} (must be 1-{})", value, maximum)
            }
            Self::InvalidRateLimit { max_requests } => {
                write!(
                    f,
                    "Invalid rate limit: {} requests per window (must be positive)",
                    max_requests
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidCorsOrigin { value } => {
                write!(f, "Invalid CORS origin: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum Redis pool size.
    const MAX_POOL_SIZE: usize = 512;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_cache(config, &mut errors);
        Self::validate_news_api(config, &mut errors);
        Self::validate_rate_limit(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let server = &config.server;
        if server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { value: server.port });
        }

        let origin = server.cors_origin.trim();
        if origin != "*" && !is_http_url(origin) {
            errors.push(ConfigValidationError::InvalidCorsOrigin {
                value: server.cors_origin.clone(),
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let redis = &config.redis;
        if !redis.enabled {
            return;
        }

        if !redis.url.starts_with("redis://") && !redis.url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }

        if redis.pool_size == 0 || redis.pool_size > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::InvalidPoolSize {
                value: redis.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if redis.timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "redis.timeout_ms".to_string(),
            });
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.cache.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
            });
        }
    }

    fn validate_news_api(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let api = &config.news_api;
        if !is_http_url(&api.base_url) {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "news_api.base_url".to_string(),
                message: format!("Invalid URL format: {}", api.base_url),
            });
        }

        if api.timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "news_api.timeout_secs".to_string(),
            });
        }
    }

    fn validate_rate_limit(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let limit = &config.rate_limit;
        if !limit.enabled {
            return;
        }

        if limit.max_requests == 0 {
            errors.push(ConfigValidationError::InvalidRateLimit {
                max_requests: limit.max_requests,
            });
        }
        if limit.window_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "rate_limit.window_secs".to_string(),
            });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// Formats validation errors into a human-readable string.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.cache.ttl_secs = 0;
        config.news_api.base_url = "ftp://news".to_string();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigValidationError::InvalidPort { value: 0 }));
        assert!(errors.contains(&ConfigValidationError::InvalidLogLevel {
            value: "verbose".to_string()
        }));
    }

    #[test]
    fn test_disabled_redis_skips_checks() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.redis.url = "memcached://localhost".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.redis.enabled = true;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rate_limit_quota() {
        let mut config = AppConfig::default();
        config.rate_limit.max_requests = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::InvalidRateLimit { max_requests: 0 }]
        );
    }

    #[test]
    fn test_cors_origin() {
        let mut config = AppConfig::default();
        config.server.cors_origin = "*".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.server.cors_origin = "localhost".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::InvalidPort { value: 0 },
            ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
            },
        ];
        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("1. Invalid server port: 0"));
        assert!(formatted.contains("2. 'cache.ttl_secs' must be positive"));
    }
}
