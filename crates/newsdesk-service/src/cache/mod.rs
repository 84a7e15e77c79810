//! Response cache.
//!
//! A key-value store with per-key TTL. The Redis implementation tracks a
//! hit counter per entry under `metadata:{key}` that expires with the entry.

mod cache_store;
pub mod cache_keys;
mod redis_cache;

pub use cache_store::{CacheExt, CacheStore};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_OP_TIMEOUT};
