use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process response cache
///
/// Upstream answers for the same query rarely change within a minute, so
/// serialised responses are kept for a short TTL. Entries are stored as JSON
/// bytes.
pub struct ResponseCache {
    cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl ResponseCache {
    /// Create a new cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// `Cache-Control` value matching the cache TTL
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.ttl_secs)
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.cache.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.cache.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    fn with_query<Q: Serialize>(prefix: &str, query: &Q) -> String {
        // Serialising the typed query normalises field order and absent params
        let normalised = serde_json::to_string(query).unwrap_or_default();
        format!("{}:{}", prefix, normalised)
    }

    /// Build a cache key for cuisine discovery
    pub fn cuisines<Q: Serialize>(query: &Q) -> String {
        Self::with_query("cuisines", query)
    }

    /// Build a cache key for restaurant search
    pub fn restaurants<Q: Serialize>(query: &Q) -> String {
        Self::with_query("restaurants", query)
    }

    /// Build a cache key for places search
    pub fn places<Q: Serialize>(query: &Q) -> String {
        Self::with_query("places", query)
    }

    /// Build a cache key for the Yelp restaurant categories
    pub fn yelp_categories() -> String {
        "yelp:categories".to_string()
    }
}
