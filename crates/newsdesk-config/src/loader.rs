//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use newsdesk_core::NewsdeskError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Plain environment variables honored on top of the layered sources,
/// mapped to their configuration key.
pub const DEPLOYMENT_ENV_VARS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("CORS_ORIGIN", "server.cors_origin"),
    ("NEWS_API_KEY", "news_api.api_key"),
    ("NEWS_API_BASE_URL", "news_api.base_url"),
    ("REDIS_URL", "redis.url"),
    ("CACHE_TTL", "cache.ttl_secs"),
    ("RATE_LIMIT_MAX_REQUESTS", "rate_limit.max_requests"),
    ("LOG_LEVEL", "observability.log_level"),
];

/// Loads and validates the layered configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `NEWSDESK_` prefix (`__` between levels)
    /// 5. Deployment variables such as `PORT`, `NEWS_API_KEY`, `REDIS_URL`
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, NewsdeskError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, NewsdeskError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, NewsdeskError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("NEWSDESK_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("NEWSDESK")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder
            .set_override("app.environment", environment)
            .map_err(config_error_to_newsdesk_error)?;

        for (key, value) in deployment_overrides(|name| std::env::var(name).ok()) {
            debug!("Applying deployment variable override for '{}'", key);
            builder = builder
                .set_override(key, value)
                .map_err(config_error_to_newsdesk_error)?;
        }

        let config = builder.build().map_err(config_error_to_newsdesk_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_newsdesk_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), NewsdeskError> {
        if config.news_api.api_key.is_empty() {
            warn!("NEWS_API_KEY is not set; headlines will be served from fallback data");
        }

        ConfigValidator::validate(config)
            .map_err(|errors| NewsdeskError::Configuration(format_validation_errors(&errors)))
    }

    /// Gets a specific configuration value by key path.
    pub fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = serde_json::to_value(&self.config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Resolves the deployment variables that are set and non-empty.
pub fn deployment_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    DEPLOYMENT_ENV_VARS
        .iter()
        .filter_map(|(var, key)| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
        .collect()
}

fn config_error_to_newsdesk_error(err: ConfigError) -> NewsdeskError {
    NewsdeskError::Configuration(err.to_string())
}
