//! Dependency injection module using Shaku.

use deadpool_redis::{Pool, PoolConfig, Runtime};
use newsdesk_config::{AppConfig, RedisConfig};
use newsdesk_core::{NewsdeskError, NewsdeskResult};
use newsdesk_service::{
    build_http_client, CacheStore, NewsService, NewsServiceImpl, NewsServiceImplParameters,
    RedisCacheService, RedisCacheServiceParameters, TheNewsApiClient, TheNewsApiClientParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::{info, warn};

// Cache store, upstream client and the cache-aside news service.
module! {
    pub NewsModule {
        components = [
            RedisCacheService,
            TheNewsApiClient,
            NewsServiceImpl,
        ],
        providers = [],
    }
}

/// Creates the Redis pool, or `None` when caching is disabled.
///
/// Connections are opened lazily, so an unreachable server is not an error
/// here; cache reads and writes fail softly instead.
pub fn create_redis_pool(config: &RedisConfig) -> NewsdeskResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled by configuration");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| NewsdeskError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Some(Arc::new(pool)))
}

/// Builds the news module from configuration.
///
/// A Redis pool that cannot be created leaves the service running without a
/// cache.
pub fn build_news_module(config: &AppConfig) -> NewsdeskResult<Arc<NewsModule>> {
    let pool = create_redis_pool(&config.redis).unwrap_or_else(|e| {
        warn!(error = %e, "Continuing without cache");
        None
    });

    let http = build_http_client(config.news_api.timeout(), &config.news_api.user_agent)?;

    let module = NewsModule::builder()
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool,
            op_timeout: config.redis.timeout(),
        })
        .with_component_parameters::<TheNewsApiClient>(TheNewsApiClientParameters {
            http,
            base_url: config.news_api.base_url.trim_end_matches('/').to_string(),
            api_key: config.news_api.api_key.clone(),
        })
        .with_component_parameters::<NewsServiceImpl>(NewsServiceImplParameters {
            cache_ttl: config.cache.ttl(),
            page_aware_keys: config.cache.page_aware_keys,
        })
        .build();

    Ok(Arc::new(module))
}

/// Convenience accessors over the module's components.
pub trait NewsResolver {
    /// Resolves the news service.
    fn news_service(&self) -> Arc<dyn NewsService>;

    /// Resolves the cache store.
    fn cache(&self) -> Arc<dyn CacheStore>;
}

impl NewsResolver for NewsModule {
    fn news_service(&self) -> Arc<dyn NewsService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheStore> {
        self.resolve()
    }
}
