//! Disk-backed catalog store.
//!
//! Both catalogs are kept in one JSON document in a cache directory and
//! mirrored in memory. A replace writes the whole document to a temporary
//! path and renames it into place, so a failed write leaves the previous
//! catalog intact on disk and in memory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::domain::{Station, StationKeyword};

use super::error::CatalogError;
use super::store::{Catalog, MemoryStore, StationStore};

const CACHE_FILE: &str = "catalog_cache.json";

/// On-disk layout of the cache document.
#[derive(Debug, Default, Deserialize)]
struct CacheFile {
    #[serde(default)]
    stations: Vec<Station>,
    #[serde(default)]
    keywords: Vec<StationKeyword>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    stations: &'a [Station],
    keywords: &'a [StationKeyword],
}

/// Catalog store persisted to a cache directory.
#[derive(Debug)]
pub struct DiskStore {
    path: PathBuf,
    memory: MemoryStore,
    /// Held across read-modify-write of the cache document.
    writer: Mutex<()>,
}

impl DiskStore {
    /// Open the store in `dir`, loading any catalog cached there.
    ///
    /// A missing or unreadable cache file starts out empty.
    pub async fn open(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(CACHE_FILE);
        let cached = load(&path).await;

        debug!(
            path = %path.display(),
            stations = cached.stations.len(),
            keywords = cached.keywords.len(),
            "opened catalog cache"
        );

        Self {
            path,
            memory: MemoryStore::with_catalog(Catalog::new(cached.stations, cached.keywords)),
            writer: Mutex::new(()),
        }
    }

    /// Persist `catalog`, then publish it.
    async fn store(&self, catalog: Catalog) -> Result<(), CatalogError> {
        persist(&self.path, &catalog).await?;
        self.memory.publish(catalog);
        Ok(())
    }
}

#[async_trait]
impl StationStore for DiskStore {
    fn watch(&self) -> watch::Receiver<Catalog> {
        self.memory.watch()
    }

    async fn replace_stations(&self, stations: Vec<Station>) -> Result<(), CatalogError> {
        let _writer = self.writer.lock().await;
        let current = self.snapshot();
        self.store(Catalog {
            stations: Arc::new(stations),
            keywords: current.keywords,
        })
        .await
    }

    async fn replace_keywords(&self, keywords: Vec<StationKeyword>) -> Result<(), CatalogError> {
        let _writer = self.writer.lock().await;
        let current = self.snapshot();
        self.store(Catalog {
            stations: current.stations,
            keywords: Arc::new(keywords),
        })
        .await
    }

    async fn replace_catalog(
        &self,
        stations: Vec<Station>,
        keywords: Vec<StationKeyword>,
    ) -> Result<(), CatalogError> {
        let _writer = self.writer.lock().await;
        self.store(Catalog::new(stations, keywords)).await
    }
}

/// Load the cache document, treating any failure as an empty catalog.
async fn load(path: &Path) -> CacheFile {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return CacheFile::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read catalog cache");
            return CacheFile::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(cached) => cached,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable catalog cache");
            CacheFile::default()
        }
    }
}

/// Write `catalog` beside `target`, then rename it into place.
///
/// Creates parent directories if they don't exist. The temporary file is
/// removed if any step fails.
async fn persist(target: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CatalogError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
    }

    let json = serde_json::to_string(&CacheFileRef {
        stations: &catalog.stations,
        keywords: &catalog.keywords,
    })
    .map_err(|e| CatalogError::Cache {
        message: format!("failed to serialize cache: {}", e),
    })?;

    let tmp = target.with_extension("json.tmp");
    let written = match tokio::fs::write(&tmp, json).await {
        Ok(()) => tokio::fs::rename(&tmp, target).await.map_err(|e| CatalogError::Cache {
            message: format!("failed to replace {}: {}", target.display(), e),
        }),
        Err(e) => Err(CatalogError::Cache {
            message: format!("failed to write cache file: {}", e),
        }),
    };

    if written.is_err()
        && let Err(e) = tokio::fs::remove_file(&tmp).await
        && e.kind() != ErrorKind::NotFound
    {
        warn!(path = %tmp.display(), error = %e, "failed to remove staged cache file");
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stations() -> Vec<Station> {
        vec![
            Station::new(33, "Warszawa Centralna", 52.228861, 21.003279, 9841),
            Station::new(63, "Łódź Fabryczna", 51.769863, 19.469326, 4602),
        ]
    }

    fn keywords() -> Vec<StationKeyword> {
        vec![
            StationKeyword::new(1, "Warszawa Centralna", 33),
            StationKeyword::new(2, "Łódź", 63),
        ]
    }

    fn names(catalog: &Catalog) -> Vec<String> {
        catalog.stations.iter().map(|s| s.name.clone()).collect()
    }

    #[tokio::test]
    async fn empty_directory_opens_empty() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).await;
        assert!(store.is_stations_empty());
        assert!(store.is_keywords_empty());
    }

    #[tokio::test]
    async fn catalog_survives_reopen() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).await;
        store.replace_catalog(stations(), keywords()).await.unwrap();

        let reopened = DiskStore::open(dir.path()).await;
        let snapshot = reopened.snapshot();
        assert_eq!(snapshot.stations.as_slice(), stations().as_slice());
        assert_eq!(snapshot.keywords.as_slice(), keywords().as_slice());
    }

    #[tokio::test]
    async fn replace_single_catalog_keeps_the_other() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).await;
        store.replace_catalog(stations(), keywords()).await.unwrap();
        let before = store.snapshot();

        store
            .replace_keywords(vec![StationKeyword::new(9, "Warszawa", 33)])
            .await
            .unwrap();

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before.stations, &after.stations));
        assert_eq!(after.keywords.len(), 1);

        let reopened = DiskStore::open(dir.path()).await;
        assert_eq!(reopened.snapshot().stations.len(), 2);
        assert_eq!(reopened.snapshot().keywords.len(), 1);
    }

    #[tokio::test]
    async fn creates_nested_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let store = DiskStore::open(&nested).await;
        store.replace_stations(stations()).await.unwrap();

        assert!(nested.join(CACHE_FILE).exists());
        assert!(!nested.join("catalog_cache.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_cache_opens_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CACHE_FILE), "not json").unwrap();

        let store = DiskStore::open(dir.path()).await;
        assert!(store.is_stations_empty());
        assert!(store.is_keywords_empty());
    }

    #[tokio::test]
    async fn failed_staging_keeps_previous_catalog() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).await;
        store.replace_catalog(stations(), keywords()).await.unwrap();

        // A directory in the way of the temp file makes staging fail.
        std::fs::create_dir(dir.path().join("catalog_cache.json.tmp")).unwrap();

        let result = store.replace_catalog(vec![], vec![]).await;
        assert!(matches!(result, Err(CatalogError::Cache { .. })));
        assert_eq!(store.snapshot().stations.len(), 2);
        assert_eq!(store.snapshot().keywords.len(), 2);

        let reopened = DiskStore::open(dir.path()).await;
        assert_eq!(reopened.snapshot().stations.len(), 2);
        assert_eq!(reopened.snapshot().keywords.len(), 2);
    }

    #[tokio::test]
    async fn failed_commit_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).await;
        store.replace_catalog(stations(), keywords()).await.unwrap();

        // Swap the cache file for a non-empty directory so the rename fails.
        let target = dir.path().join(CACHE_FILE);
        std::fs::remove_file(&target).unwrap();
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("blocker"), "x").unwrap();

        let result = store
            .replace_catalog(
                vec![Station::new(1, "Nowa", 50.0, 20.0, 1)],
                vec![StationKeyword::new(1, "Nowa", 1)],
            )
            .await;
        assert!(matches!(result, Err(CatalogError::Cache { .. })));
        assert_eq!(
            names(&store.snapshot()),
            vec!["Warszawa Centralna", "Łódź Fabryczna"]
        );
        assert!(!dir.path().join("catalog_cache.json.tmp").exists());

        // The blocked target is the only entry; no partial file was left.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(CACHE_FILE)]);
        assert!(target.join("blocker").exists());
    }
}
