//! Caching layer for activity searches.
//!
//! Entries are keyed by a SHA-256 hash of the provider name and the
//! serialized query, so equal queries share an entry however they were
//! built. Provider failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::error::ActivityError;
use super::provider::ActivityProvider;
use super::types::{ActivityQuery, ActivitySummary};

type Entry = Arc<Vec<ActivitySummary>>;

/// Configuration for the activity cache.
#[derive(Debug, Clone)]
pub struct ActivityCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for ActivityCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Hex SHA-256 of `provider` and the JSON form of `query`.
pub fn cache_key(provider: &str, query: &ActivityQuery) -> String {
    let mut hasher = Sha256::new();
    hasher.update(provider.as_bytes());
    hasher.update(b"\n");
    // Serializing a plain enum of numbers and strings can't fail
    let body = serde_json::to_string(query).unwrap_or_default();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}

/// Activity provider with caching.
///
/// Wraps any [`ActivityProvider`] and is one itself, so callers don't
/// need to know whether they hold the cached or uncached form.
pub struct CachedActivityClient {
    inner: Arc<dyn ActivityProvider>,
    cache: MokaCache<String, Entry>,
}

impl CachedActivityClient {
    pub fn new(inner: Arc<dyn ActivityProvider>, config: &ActivityCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner, cache }
    }

    /// Search, using the cache if available.
    pub async fn search_cached(&self, query: &ActivityQuery) -> Result<Entry, ActivityError> {
        let key = cache_key(self.inner.name(), query);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(provider = self.inner.name(), "activity cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(self.inner.search(query).await?);
        self.cache.insert(key, entry.clone()).await;
        Ok(entry)
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl ActivityProvider for CachedActivityClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(&self, query: &ActivityQuery) -> Result<Vec<ActivitySummary>, ActivityError> {
        let entry = self.search_cached(query).await?;
        Ok(entry.as_ref().clone())
    }
}
