//! Caching layer for search results.
//!
//! Results are keyed by engine generation and query. A refresh bumps the
//! generation, so entries from an older engine can never be served even
//! before they expire.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::Deserialize;

use crate::domain::RouteQuery;
use crate::engine::{SearchError, SearchResult, parse_query};
use crate::shared::{EngineSnapshot, SharedEngine};
use crate::sources::{SourceError, SourceProvider};

/// Cache key: (engine generation, query).
type ResultKey = (u64, RouteQuery);

/// Configuration for the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for cached entries, in seconds.
    pub ttl_secs: u64,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_capacity: 1000,
        }
    }
}

/// Search front-end with result caching.
///
/// Wraps a [`SharedEngine`] and caches results per query.
pub struct CachedSearch {
    shared: SharedEngine,
    results: MokaCache<ResultKey, Arc<SearchResult>>,
}

impl CachedSearch {
    pub fn new(shared: SharedEngine, config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl())
            .max_capacity(config.max_capacity)
            .build();

        Self { shared, results }
    }

    /// Search from raw query strings, using the cache if available.
    ///
    /// Invalid input is rejected before the cache is consulted.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Arc<SearchResult>, SearchError> {
        let query = parse_query(origin, destination, date)?;
        let snapshot = self.shared.snapshot().await;
        Ok(self.search_snapshot(&snapshot, query).await)
    }

    /// Answer `query` from `snapshot`, caching the result only while the
    /// snapshot is still current.
    async fn search_snapshot(
        &self,
        snapshot: &EngineSnapshot,
        query: RouteQuery,
    ) -> Arc<SearchResult> {
        let key = (snapshot.generation, query);

        if let Some(cached) = self.results.get(&key).await {
            return cached;
        }

        let result = Arc::new(snapshot.engine.search_query(&key.1));
        if self.shared.generation().await == snapshot.generation {
            self.results.insert(key, result.clone()).await;
        }
        result
    }

    /// Reload the engine and drop every cached result.
    pub async fn refresh<P: SourceProvider>(&self, provider: &P) -> Result<u64, SourceError> {
        let generation = self.shared.refresh(provider).await?;
        self.results.invalidate_all();
        Ok(generation)
    }

    /// Access the underlying engine handle.
    pub fn shared(&self) -> &SharedEngine {
        &self.shared
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }
}
