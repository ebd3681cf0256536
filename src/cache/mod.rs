//! Cache-aside helpers over a pluggable key-value backend.
//!
//! Backend failures never fail a request: reads degrade to a miss and
//! writes are skipped, both with an error log.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

/// Cache handle type (Arc-wrapped for sharing across handlers)
pub type SharedCache = Arc<dyn Cache>;

/// String key-value cache with per-entry expiry
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()>;
}

/// Build a `<namespace>::<part>_<part>` key
pub fn cache_key(namespace: &str, parts: &[&dyn Display]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("_");
    format!("{namespace}::{joined}")
}

/// Look up `key`, returning `None` on a miss, an undecodable entry or a backend failure
pub async fn lookup<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!("Cache hit: {}", key);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::error!("Cache read failed for {}: {:?}", key, e);
            None
        }
    }
}

/// Overwrite `key` with `value` (write-through)
pub async fn store<T: Serialize>(cache: &dyn Cache, key: &str, value: &T, ttl: Duration) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Failed to encode cache entry {}: {}", key, e);
            return;
        }
    };

    if let Err(e) = cache.set(key, &raw, ttl).await {
        tracing::error!("Cache write failed for {}: {:?}", key, e);
    }
}

/// Cache-aside: return the cached value for `key`, or run `load`, cache its
/// result and return it. Errors from `load` are returned and never cached.
pub async fn cached<T, F, Fut>(cache: &dyn Cache, key: &str, ttl: Duration, load: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(hit) = lookup(cache, key).await {
        return Ok(hit);
    }

    let value = load().await?;
    store(cache, key, &value, ttl).await;
    Ok(value)
}
