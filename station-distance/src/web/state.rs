//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::domain::StationKeyword;
use crate::session::normalize_keywords;
use crate::sync::SyncOrchestrator;

/// Normalized keywords for the catalog snapshot they were built from.
#[derive(Default)]
struct NormalizedKeywords {
    source: Arc<Vec<StationKeyword>>,
    normalized: Arc<Vec<StationKeyword>>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Sync orchestrator, which also owns the catalog store
    pub sync: Arc<SyncOrchestrator>,

    keywords: Arc<RwLock<NormalizedKeywords>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(sync: Arc<SyncOrchestrator>) -> Self {
        Self {
            sync,
            keywords: Arc::new(RwLock::new(NormalizedKeywords::default())),
        }
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Catalog {
        self.sync.store().snapshot()
    }

    /// Normalized keywords for `catalog`, rebuilt only when its keywords
    /// differ from the last snapshot seen.
    pub async fn normalized_keywords(&self, catalog: &Catalog) -> Arc<Vec<StationKeyword>> {
        {
            let cached = self.keywords.read().await;
            if Arc::ptr_eq(&cached.source, &catalog.keywords) {
                return cached.normalized.clone();
            }
        }

        let mut cached = self.keywords.write().await;
        if !Arc::ptr_eq(&cached.source, &catalog.keywords) {
            cached.normalized = Arc::new(normalize_keywords(&catalog.keywords));
            cached.source = catalog.keywords.clone();
        }
        cached.normalized.clone()
    }
}
