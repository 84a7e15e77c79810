//! Redis-based cache implementation.

use super::CacheStore;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Connection, Pool};
use newsdesk_core::{CacheMetadata, NewsdeskError, NewsdeskResult};
use newsdesk_resilience::with_timeout;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Deadline for acquiring a connection and running one command.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(3);

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` disables caching.
    pool: Option<Arc<Pool>>,
    /// Per-operation deadline.
    #[shaku(default = DEFAULT_OP_TIMEOUT)]
    op_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Create a cache service with a custom per-operation deadline.
    #[must_use]
    pub fn with_timeout(pool: Arc<Pool>, op_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            op_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled or unreachable).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> NewsdeskResult<Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                NewsdeskError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(NewsdeskError::Cache("Cache is disabled".to_string())),
        }
    }

    /// Runs `f` on a pooled connection under the operation deadline.
    async fn run<T, F, Fut>(&self, operation: &str, f: F) -> NewsdeskResult<T>
    where
        F: FnOnce(Connection) -> Fut,
        Fut: Future<Output = NewsdeskResult<T>>,
    {
        with_timeout(operation, self.op_timeout, || async move {
            let conn = self.get_conn().await?;
            f(conn).await
        })
        .await
    }

    /// Bumps the hit counter of `key`, keeping the metadata expiry aligned
    /// with the remaining lifetime of the entry.
    async fn record_hit(&self, key: &str) -> NewsdeskResult<()> {
        let metadata_key = CacheMetadata::storage_key(key);

        self.run("redis record hit", |mut conn| async move {
            let raw: Option<String> = conn.get(&metadata_key).await.map_err(|e| {
                NewsdeskError::Cache(format!("Failed to get key '{}': {}", metadata_key, e))
            })?;
            let Some(raw) = raw else {
                return Ok(());
            };

            let remaining: i64 = conn.ttl(key).await.map_err(|e| {
                NewsdeskError::Cache(format!("Failed to read TTL of '{}': {}", key, e))
            })?;
            let Some((json, ttl_secs)) = bumped_metadata(&raw, remaining)? else {
                return Ok(());
            };

            conn.set_ex::<_, _, ()>(&metadata_key, json, ttl_secs)
                .await
                .map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to set key '{}': {}", metadata_key, e))
                })
        })
        .await
    }
}

#[async_trait]
impl CacheStore for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> NewsdeskResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let value: Option<String> = self
            .run("redis GET", |mut conn| async move {
                conn.get::<_, Option<String>>(key).await.map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to get key '{}': {}", key, e))
                })
            })
            .await?;

        match &value {
            Some(_) => {
                debug!(key = %key, "Cache hit");
                if let Err(e) = self.record_hit(key).await {
                    warn!(key = %key, error = %e, "Failed to update cache metadata");
                }
            }
            None => debug!(key = %key, "Cache miss"),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> NewsdeskResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl_secs = entry_ttl_secs(ttl);
        let metadata = serde_json::to_string(&CacheMetadata::new(key, ttl_secs))?;
        let metadata_key = CacheMetadata::storage_key(key);

        self.run("redis SETEX", |mut conn| async move {
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| NewsdeskError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

            if let Err(e) = conn
                .set_ex::<_, _, ()>(&metadata_key, metadata, ttl_secs)
                .await
            {
                warn!(key = %key, error = %e, "Failed to save cache metadata");
            }
            Ok(())
        })
        .await?;

        debug!(key = %key, ttl = ttl_secs, "Cache set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> NewsdeskResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let metadata_key = CacheMetadata::storage_key(key);
        let deleted: i64 = self
            .run("redis DEL", |mut conn| async move {
                let deleted: i64 = conn.del(key).await.map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to delete key '{}': {}", key, e))
                })?;
                conn.del::<_, ()>(&metadata_key).await.map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to delete key '{}': {}", metadata_key, e))
                })?;
                Ok(deleted)
            })
            .await?;

        debug!(key = %key, deleted = deleted > 0, "Cache deleted");
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> NewsdeskResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let metadata_pattern = CacheMetadata::storage_key(pattern);
        let deleted: i64 = self
            .run("redis KEYS/DEL", |mut conn| async move {
                let keys: Vec<String> = conn.keys(pattern).await.map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to scan keys: {}", e))
                })?;
                if keys.is_empty() {
                    return Ok(0);
                }

                let metadata_keys: Vec<String> =
                    conn.keys(&metadata_pattern).await.map_err(|e| {
                        NewsdeskError::Cache(format!("Failed to scan keys: {}", e))
                    })?;

                let deleted: i64 = conn.del(&keys).await.map_err(|e| {
                    NewsdeskError::Cache(format!("Failed to delete keys: {}", e))
                })?;
                if !metadata_keys.is_empty() {
                    conn.del::<_, ()>(&metadata_keys).await.map_err(|e| {
                        NewsdeskError::Cache(format!("Failed to delete keys: {}", e))
                    })?;
                }
                Ok(deleted)
            })
            .await?;

        info!(pattern = %pattern, keys_deleted = deleted, "Cache invalidated");
        Ok(deleted.max(0) as u64)
    }

    async fn clear(&self) -> NewsdeskResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        self.run("redis FLUSHDB", |mut conn| async move {
            let _: () = deadpool_redis::redis::cmd("FLUSHDB")
                .query_async(&mut conn)
                .await
                .map_err(|e| NewsdeskError::Cache(format!("Failed to clear cache: {}", e)))?;
            Ok(())
        })
        .await?;

        info!("Cache cleared");
        Ok(())
    }

    async fn exists(&self, key: &str) -> NewsdeskResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        self.run("redis EXISTS", |mut conn| async move {
            conn.exists::<_, bool>(key).await.map_err(|e| {
                NewsdeskError::Cache(format!("Failed to check key '{}': {}", key, e))
            })
        })
        .await
    }

    async fn ping(&self) -> NewsdeskResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        self.run("redis PING", |mut conn| async move {
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| NewsdeskError::Cache(format!("Redis ping failed: {}", e)))?;
            Ok(true)
        })
        .await
    }

    async fn metadata(&self, key: &str) -> NewsdeskResult<Option<CacheMetadata>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let metadata_key = CacheMetadata::storage_key(key);
        let raw: Option<String> = self
            .run("redis GET", |mut conn| async move {
                conn.get::<_, Option<String>>(&metadata_key)
                    .await
                    .map_err(|e| {
                        NewsdeskError::Cache(format!(
                            "Failed to get key '{}': {}",
                            metadata_key, e
                        ))
                    })
            })
            .await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

/// Expiry applied to an entry and its metadata. Redis rejects a zero TTL.
fn entry_ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// Counts one hit on a stored metadata record.
///
/// Returns the updated record and the expiry to store it with, which is the
/// remaining lifetime of the entry it describes. `None` when that entry has
/// no positive TTL left.
fn bumped_metadata(raw: &str, remaining_ttl: i64) -> NewsdeskResult<Option<(String, u64)>> {
    let Ok(ttl_secs) = u64::try_from(remaining_ttl) else {
        return Ok(None);
    };
    if ttl_secs == 0 {
        return Ok(None);
    }

    let mut metadata: CacheMetadata = serde_json::from_str(raw)?;
    metadata.record_hit();
    Ok(Some((serde_json::to_string(&metadata)?, ttl_secs)))
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}
