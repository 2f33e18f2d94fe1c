//! Key/value cache used by diagnostics.
//!
//! The recommendation path never reads or writes the cache. A deployment picks
//! a backend in configuration; `disabled` means no client is constructed at
//! all, and [`DisabledCache`] is the explicit no-op for callers that need one.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;
}

/// Accepts every write and remembers nothing. Bootstrap never builds one for
/// `cache.backend = "disabled"`; it exists for callers that need a client
/// value regardless of configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledCache;

#[async_trait]
impl CacheClient for DisabledCache {
    async fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Value, _ttl: Option<Duration>) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
        Ok(false)
    }
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Process-local cache with per-entry expiry. Expired entries are dropped
/// lazily on access.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Option<Duration>,
}

impl MemoryCache {
    pub fn new(default_ttl: Option<Duration>) -> Self {
        Self { entries: RwLock::default(), default_ttl }
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        self.entries.write().await.retain(|_, entry| entry.is_live(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.or(self.default_ttl).map(|ttl| Instant::now() + ttl);
        self.entries.write().await.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::{CacheClient, DisabledCache, MemoryCache};

    #[tokio::test]
    async fn disabled_cache_never_returns_values() {
        let cache = DisabledCache;
        cache.set("health_check", json!({"status": "ok"}), None).await.expect("set");

        assert_eq!(cache.get("health_check").await.expect("get"), None);
        assert!(!cache.exists("health_check").await.expect("exists"));
    }

    #[tokio::test]
    async fn memory_cache_round_trips_and_deletes() {
        let cache = MemoryCache::new(None);
        cache.set("health_check", json!({"status": "ok"}), None).await.expect("set");

        assert_eq!(cache.get("health_check").await.expect("get"), Some(json!({"status": "ok"})));
        assert!(cache.exists("health_check").await.expect("exists"));

        cache.delete("health_check").await.expect("delete");
        assert!(!cache.exists("health_check").await.expect("exists"));
    }

    #[tokio::test(start_paused = true)]
    async fn memory_cache_entries_expire() {
        let cache = MemoryCache::new(Some(Duration::from_secs(60)));
        cache.set("short", json!(1), Some(Duration::from_secs(10))).await.expect("set short");
        cache.set("default", json!(2), None).await.expect("set default");

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("short").await.expect("get short"), None);
        assert_eq!(cache.get("default").await.expect("get default"), Some(json!(2)));

        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(!cache.exists("default").await.expect("exists default"));
    }
}
