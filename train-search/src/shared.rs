//! Shared, refreshable engine handle.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::domain::RouteQuery;
use crate::engine::{Engine, EngineConfig, SearchError, SearchResult};
use crate::sources::{SourceError, SourceProvider};

/// A consistent view of the engine at one point in time.
///
/// The generation increases every time the engine is replaced, so anything
/// derived from a snapshot can tell whether it is stale.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub generation: u64,
    pub engine: Arc<Engine>,
}

/// Thread-safe engine handle with support for background reload.
///
/// Searches run against a snapshot and never see a half-built engine. A
/// reload builds the new engine off to the side and swaps it in atomically.
/// Reloads run one at a time, so the newest load is always the one left in
/// place.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<EngineSnapshot>>,
    config: Arc<EngineConfig>,
    refreshing: Arc<Mutex<()>>,
}

impl SharedEngine {
    /// Wrap an already-built engine.
    pub fn new(engine: Engine, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(EngineSnapshot {
                generation: 0,
                engine: Arc::new(engine),
            })),
            config: Arc::new(config),
            refreshing: Arc::new(Mutex::new(())),
        }
    }

    /// Build the initial engine from `provider`.
    ///
    /// This will fail if any source cannot be loaded.
    pub async fn load<P: SourceProvider>(
        provider: &P,
        config: EngineConfig,
    ) -> Result<Self, SourceError> {
        let engine = Engine::load(provider, &config).await?;
        Ok(Self::new(engine, config))
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> EngineSnapshot {
        self.inner.read().await.clone()
    }

    /// Current generation number.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reload every source and swap in the new engine.
    ///
    /// On failure the current engine stays in place and the error is
    /// returned. Returns the new generation on success.
    pub async fn refresh<P: SourceProvider>(&self, provider: &P) -> Result<u64, SourceError> {
        let _guard = self.refreshing.lock().await;
        let engine = Engine::load(provider, &self.config).await?;
        let records = engine.table().len();
        let generation = self.replace(engine).await;
        info!(generation, records, "engine refreshed");
        Ok(generation)
    }

    /// Swap in a prebuilt engine. Returns the new generation.
    pub async fn replace(&self, engine: Engine) -> u64 {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.engine = Arc::new(engine);
        guard.generation
    }

    /// Search from raw query strings against the current snapshot.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<SearchResult, SearchError> {
        let snapshot = self.snapshot().await;
        snapshot.engine.search(origin, destination, date)
    }

    /// Search with a validated query against the current snapshot.
    pub async fn search_query(&self, query: &RouteQuery) -> SearchResult {
        self.snapshot().await.engine.search_query(query)
    }
}
