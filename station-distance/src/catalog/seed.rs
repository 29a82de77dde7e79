//! Bundled offline catalog snapshot.
//!
//! Used to bootstrap an empty cache when the remote API is unreachable.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::{Station, StationKeyword};

use super::error::CatalogError;

/// File name of the bundled station snapshot.
pub const STATIONS_FILE: &str = "stations.json";

/// File name of the bundled keyword snapshot.
pub const KEYWORDS_FILE: &str = "station_keywords.json";

/// Directory holding the snapshot shipped with the crate.
pub const BUNDLED_SEED_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed");

/// Read-only source of the bundled station and keyword snapshots.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Read the bundled station snapshot.
    async fn read_stations(&self) -> Result<Vec<Station>, CatalogError>;

    /// Read the bundled keyword snapshot.
    async fn read_keywords(&self) -> Result<Vec<StationKeyword>, CatalogError>;
}

/// Seed snapshot stored as two JSON files in a directory.
///
/// The files use the same schema as the remote API responses.
#[derive(Debug, Clone)]
pub struct SeedFiles {
    dir: PathBuf,
}

impl SeedFiles {
    /// Create a seed source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, CatalogError> {
        let path = self.dir.join(file);
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CatalogError::Seed {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;

        serde_json::from_str(&json).map_err(|e| CatalogError::Seed {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }
}

#[async_trait]
impl SeedSource for SeedFiles {
    async fn read_stations(&self) -> Result<Vec<Station>, CatalogError> {
        self.read(STATIONS_FILE).await
    }

    async fn read_keywords(&self) -> Result<Vec<StationKeyword>, CatalogError> {
        self.read(KEYWORDS_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn bundled() -> SeedFiles {
        SeedFiles::new(BUNDLED_SEED_DIR)
    }

    #[tokio::test]
    async fn bundled_snapshot_loads() {
        let seed = bundled();
        let stations = seed.read_stations().await.unwrap();
        let keywords = seed.read_keywords().await.unwrap();

        assert!(!stations.is_empty());
        assert!(!keywords.is_empty());
    }

    #[tokio::test]
    async fn bundled_keywords_resolve() {
        let seed = bundled();
        let stations = seed.read_stations().await.unwrap();
        let keywords = seed.read_keywords().await.unwrap();

        for keyword in &keywords {
            assert!(
                stations.iter().any(|s| s.id == keyword.station_id),
                "keyword {:?} points at unknown station",
                keyword.keyword
            );
        }
    }

    #[tokio::test]
    async fn missing_directory_is_seed_error() {
        let seed = SeedFiles::new("/nonexistent/seed");
        assert!(matches!(
            seed.read_stations().await,
            Err(CatalogError::Seed { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_file_is_seed_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(KEYWORDS_FILE), "[{\"id\": 1}]").unwrap();

        let seed = SeedFiles::new(dir.path());
        match seed.read_keywords().await {
            Err(CatalogError::Seed { message }) => assert!(message.contains("failed to parse")),
            other => panic!("expected seed error, got {other:?}"),
        }
    }
}
