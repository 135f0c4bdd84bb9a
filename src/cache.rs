// ABOUTME: In-memory query cache with LRU eviction and a stale time
// ABOUTME: Stores serialized responses under recipe list and recipe detail keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use crate::config::ClientConfig;
use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_STALE_TIME_SECS, RECIPE_DETAIL_PREFIX, RECIPE_LIST_KEY,
};
use crate::errors::AppResult;
use crate::models::RecipeId;
use lru::LruCache;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Identifies a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /recipes`
    RecipeList,
    /// `GET /recipes/{id}`
    Recipe(RecipeId),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeList => f.write_str(RECIPE_LIST_KEY),
            Self::Recipe(id) => write!(f, "{RECIPE_DETAIL_PREFIX}:{id}"),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    fetched_at: Instant,
}

/// Query cache shared by every clone
///
/// Entries older than the stale time are treated as absent and removed on
/// access. Capacity is bounded; the least recently used entry is evicted first.
#[derive(Clone)]
pub struct QueryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    stale_time: Duration,
}

impl QueryCache {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_MAX_ENTRIES) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    /// Create a cache; a capacity of zero falls back to the default
    #[must_use]
    pub fn new(max_entries: usize, stale_time: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            stale_time,
        }
    }

    /// Create a cache sized and timed from client configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.cache_max_entries, config.stale_time)
    }

    /// Configured stale time
    #[must_use]
    pub const fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Fresh cached value for `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the stored bytes no longer decode as `T`
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> AppResult<Option<T>> {
        let cache_key = key.to_string();
        let mut store = self.store.write().await;

        let Some(entry) = store.get(&cache_key) else {
            drop(store);
            debug!(key = %cache_key, "Query cache miss");
            return Ok(None);
        };

        if entry.fetched_at.elapsed() >= self.stale_time {
            store.pop(&cache_key);
            drop(store);
            debug!(key = %cache_key, "Query cache entry stale");
            return Ok(None);
        }

        let value = serde_json::from_slice(&entry.data)?;
        drop(store);
        debug!(key = %cache_key, "Query cache hit");
        Ok(Some(value))
    }

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized
    pub async fn set<T: Serialize + Sync>(&self, key: &QueryKey, value: &T) -> AppResult<()> {
        let data = serde_json::to_vec(value)?;
        let entry = CacheEntry {
            data,
            fetched_at: Instant::now(),
        };
        self.store.write().await.push(key.to_string(), entry);
        Ok(())
    }

    /// Drop one entry
    pub async fn invalidate(&self, key: &QueryKey) {
        let removed = self.store.write().await.pop(&key.to_string()).is_some();
        if removed {
            debug!(key = %key, "Query cache entry invalidated");
        }
    }

    /// Whether a fresh entry exists, without touching LRU order
    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.store
            .read()
            .await
            .peek(&key.to_string())
            .is_some_and(|entry| entry.fetched_at.elapsed() < self.stale_time)
    }

    /// Drop everything
    pub async fn clear_all(&self) {
        self.store.write().await.clear();
    }

    /// Number of stored entries, stale ones included
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(
            DEFAULT_CACHE_MAX_ENTRIES,
            Duration::from_secs(DEFAULT_STALE_TIME_SECS),
        )
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_time", &self.stale_time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_strings() {
        assert_eq!(QueryKey::RecipeList.to_string(), "recipes");
        assert_eq!(QueryKey::Recipe(42).to_string(), "recipe:42");
    }

    #[tokio::test]
    async fn test_zero_stale_time_never_hits() {
        let cache = QueryCache::new(4, Duration::ZERO);
        cache.set(&QueryKey::RecipeList, &vec![1, 2, 3]).await.unwrap();
        let hit: Option<Vec<i32>> = cache.get(&QueryKey::RecipeList).await.unwrap();
        assert!(hit.is_none());
        assert!(cache.is_empty().await);
    }
}
