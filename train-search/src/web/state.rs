//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedSearch;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached search over the current engine
    pub search: Arc<CachedSearch>,
}

impl AppState {
    pub fn new(search: CachedSearch) -> Self {
        Self {
            search: Arc::new(search),
        }
    }
}
