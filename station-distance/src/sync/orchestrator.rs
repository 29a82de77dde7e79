//! Catalog sync orchestration.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::catalog::{
    CatalogError, Connectivity, LastSyncStore, RemoteSource, SeedSource, StationStore,
};
use crate::events::{Notice, NoticeSender, emit};
use crate::refresh::RefreshPolicy;

/// Shortest period accepted by [`SyncOrchestrator::spawn_periodic`].
const MIN_SYNC_PERIOD: Duration = Duration::from_millis(1);

/// Collaborators the orchestrator reads from and writes to.
#[derive(Clone)]
pub struct SyncSources {
    pub remote: Arc<dyn RemoteSource>,
    pub seed: Arc<dyn SeedSource>,
    pub store: Arc<dyn StationStore>,
    pub last_sync: Arc<dyn LastSyncStore>,
    pub connectivity: Arc<dyn Connectivity>,
}

/// Result of loading empty catalogs from the seed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// Both catalogs already had data; the seed was not read.
    NotNeeded,
    /// Empty catalogs were filled. Counts are `None` for catalogs that
    /// were left alone.
    Loaded {
        stations: Option<usize>,
        keywords: Option<usize>,
    },
    /// Reading or storing the seed failed.
    Failed,
}

/// What a sync invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Online and the last remote sync is recent enough.
    UpToDate,
    /// Both catalogs were replaced from the remote API.
    Refreshed { stations: usize, keywords: usize },
    /// The remote fetch failed and the seed fallback ran.
    RemoteFailed { seed: SeedOutcome },
    /// Offline; the seed fallback ran.
    Offline { seed: SeedOutcome },
}

/// Keeps the local catalog in sync with the remote API.
///
/// When online and the data is stale, both catalogs are fetched and
/// replaced together. When offline, or when the fetch fails, empty
/// catalogs are filled from the bundled seed. Only one sync runs at a time.
pub struct SyncOrchestrator {
    sources: SyncSources,
    policy: RefreshPolicy,
    notices: NoticeSender,
    updating: watch::Sender<bool>,
    running: Mutex<()>,
}

/// Holds the updating flag high until dropped.
///
/// Dropping also covers a sync future that is abandoned mid-flight.
struct Updating<'a>(&'a watch::Sender<bool>);

impl<'a> Updating<'a> {
    fn begin(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for Updating<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl SyncOrchestrator {
    /// Create an orchestrator with the default one-day refresh policy.
    pub fn new(sources: SyncSources, notices: NoticeSender) -> Self {
        let (updating, _) = watch::channel(false);
        Self {
            sources,
            policy: RefreshPolicy::default(),
            notices,
            updating,
            running: Mutex::new(()),
        }
    }

    /// Set a custom refresh policy.
    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the refresh policy.
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Get the catalog store.
    pub fn store(&self) -> &Arc<dyn StationStore> {
        &self.sources.store
    }

    /// Get the last sync timestamp store.
    pub fn last_sync(&self) -> &Arc<dyn LastSyncStore> {
        &self.sources.last_sync
    }

    /// Check whether a sync is currently doing work.
    pub fn is_updating(&self) -> bool {
        *self.updating.borrow()
    }

    /// Subscribe to the updating flag.
    pub fn watch_updating(&self) -> watch::Receiver<bool> {
        self.updating.subscribe()
    }

    /// Sync using the current wall-clock time.
    pub async fn sync(&self) -> SyncOutcome {
        self.sync_at(chrono::Utc::now().timestamp_millis()).await
    }

    /// Sync as if the current time were `now_ms` (epoch milliseconds).
    pub async fn sync_at(&self, now_ms: i64) -> SyncOutcome {
        let _running = self.running.lock().await;

        if self.sources.connectivity.is_connected().await {
            self.update_from_remote(now_ms).await
        } else {
            debug!("offline, checking local catalog");
            SyncOutcome::Offline {
                seed: self.preload_from_seed().await,
            }
        }
    }

    /// Run `sync` now and then every `every` in a background task.
    ///
    /// Periods shorter than a millisecond are raised to one millisecond.
    pub fn spawn_periodic(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let every = every.max(MIN_SYNC_PERIOD);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let outcome = self.sync().await;
                info!(?outcome, "catalog sync finished");
            }
        })
    }

    async fn update_from_remote(&self, now_ms: i64) -> SyncOutcome {
        let last_ms = self.sources.last_sync.last_sync_ms();
        if !self.policy.is_stale(last_ms, now_ms) {
            debug!(last_ms, now_ms, "catalog is fresh, skipping remote update");
            return SyncOutcome::UpToDate;
        }

        let _updating = Updating::begin(&self.updating);

        match self.replace_from_remote(now_ms).await {
            Ok((stations, keywords)) => {
                info!(stations, keywords, "catalog refreshed from remote");
                SyncOutcome::Refreshed { stations, keywords }
            }
            Err(e) => {
                error!(error = %e, "remote data update failed");
                emit(&self.notices, Notice::RemoteUpdateFailed);
                SyncOutcome::RemoteFailed {
                    seed: self.seed_missing().await,
                }
            }
        }
    }

    /// Fetch both catalogs, then replace them together.
    ///
    /// Nothing is written unless both fetches succeed.
    async fn replace_from_remote(&self, now_ms: i64) -> Result<(usize, usize), CatalogError> {
        let remote = &self.sources.remote;
        let (stations, keywords) =
            futures::try_join!(remote.fetch_stations(), remote.fetch_keywords())?;
        let counts = (stations.len(), keywords.len());

        self.sources.store.replace_catalog(stations, keywords).await?;
        self.sources.last_sync.set_last_sync_ms(now_ms).await?;

        Ok(counts)
    }

    async fn preload_from_seed(&self) -> SeedOutcome {
        if !self.needs_seed() {
            return SeedOutcome::NotNeeded;
        }

        let _updating = Updating::begin(&self.updating);
        self.seed_missing().await
    }

    fn needs_seed(&self) -> bool {
        let store = &self.sources.store;
        store.is_stations_empty() || store.is_keywords_empty()
    }

    /// Fill each empty catalog from the seed snapshot.
    async fn seed_missing(&self) -> SeedOutcome {
        let store = &self.sources.store;
        let stations_empty = store.is_stations_empty();
        let keywords_empty = store.is_keywords_empty();

        if !stations_empty && !keywords_empty {
            return SeedOutcome::NotNeeded;
        }

        match self.load_seed(stations_empty, keywords_empty).await {
            Ok((stations, keywords)) => {
                info!(?stations, ?keywords, "catalog loaded from seed");
                SeedOutcome::Loaded { stations, keywords }
            }
            Err(e) => {
                error!(error = %e, "failed to read seed catalog");
                emit(&self.notices, Notice::CachedDataUnavailable);
                SeedOutcome::Failed
            }
        }
    }

    /// Stops at the first failure; catalogs already replaced stay.
    async fn load_seed(
        &self,
        stations: bool,
        keywords: bool,
    ) -> Result<(Option<usize>, Option<usize>), CatalogError> {
        let seed = &self.sources.seed;
        let store = &self.sources.store;
        let mut loaded = (None, None);

        if stations {
            let rows = seed.read_stations().await?;
            loaded.0 = Some(rows.len());
            store.replace_stations(rows).await?;
        }
        if keywords {
            let rows = seed.read_keywords().await?;
            loaded.1 = Some(rows.len());
            store.replace_keywords(rows).await?;
        }

        Ok(loaded)
    }
}
