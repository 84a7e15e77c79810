//! Cache store trait.

use async_trait::async_trait;
use newsdesk_core::{CacheMetadata, NewsdeskResult};
use shaku::Interface;
use std::time::Duration;

/// Key-value store with per-key expiry.
///
/// Values are JSON strings so the trait stays object safe. A store without a
/// backing connection answers every call with its "unavailable" value
/// (`None`, `false`, `0`, `Ok(())`) instead of an error.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the value under `key`, or `None` if absent or expired.
    async fn get_raw(&self, key: &str) -> NewsdeskResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> NewsdeskResult<()>;

    /// Deletes `key`. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> NewsdeskResult<bool>;

    /// Deletes every key matching a glob pattern. Returns the number deleted.
    async fn delete_pattern(&self, pattern: &str) -> NewsdeskResult<u64>;

    /// Removes every entry.
    async fn clear(&self) -> NewsdeskResult<()>;

    /// Returns `true` if `key` is present.
    async fn exists(&self, key: &str) -> NewsdeskResult<bool>;

    /// Round-trips to the backing store. `Ok(false)` when no store is configured.
    async fn ping(&self) -> NewsdeskResult<bool>;

    /// Returns the bookkeeping record of `key`, if any.
    async fn metadata(&self, key: &str) -> NewsdeskResult<Option<CacheMetadata>>;

    /// Returns `true` when a backing store is configured.
    fn is_enabled(&self) -> bool;
}

/// Typed helpers over [`CacheStore`].
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Gets and deserializes a value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> NewsdeskResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serializes and stores a value.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> NewsdeskResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheStore + ?Sized> CacheExt for T {}
