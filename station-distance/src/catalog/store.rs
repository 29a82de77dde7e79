//! Local catalog store.
//!
//! The store holds the current station and keyword catalogs as one
//! immutable snapshot. Writers replace a catalog wholesale; readers either
//! take the latest snapshot or subscribe to be told when it changes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Station, StationKeyword};

use super::error::CatalogError;

/// Immutable view of the station and keyword catalogs.
///
/// Cloning is cheap: both catalogs are shared.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub stations: Arc<Vec<Station>>,
    pub keywords: Arc<Vec<StationKeyword>>,
}

impl Catalog {
    /// Create a catalog from station and keyword lists.
    pub fn new(stations: Vec<Station>, keywords: Vec<StationKeyword>) -> Self {
        Self {
            stations: Arc::new(stations),
            keywords: Arc::new(keywords),
        }
    }

    /// Look up a station by its exact display name.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }
}

/// Cache of the station and keyword catalogs.
///
/// Every replace is all-or-nothing from a reader's point of view: a
/// snapshot never shows a catalog half written or emptied ahead of an
/// insert.
#[async_trait]
pub trait StationStore: Send + Sync {
    /// Subscribe to catalog snapshots.
    fn watch(&self) -> watch::Receiver<Catalog>;

    /// Get the current snapshot.
    fn snapshot(&self) -> Catalog {
        self.watch().borrow().clone()
    }

    /// Check if the station catalog is empty.
    fn is_stations_empty(&self) -> bool {
        self.watch().borrow().stations.is_empty()
    }

    /// Check if the keyword catalog is empty.
    fn is_keywords_empty(&self) -> bool {
        self.watch().borrow().keywords.is_empty()
    }

    /// Replace the whole station catalog.
    async fn replace_stations(&self, stations: Vec<Station>) -> Result<(), CatalogError>;

    /// Replace the whole keyword catalog.
    async fn replace_keywords(&self, keywords: Vec<StationKeyword>) -> Result<(), CatalogError>;

    /// Replace both catalogs as one unit.
    async fn replace_catalog(
        &self,
        stations: Vec<Station>,
        keywords: Vec<StationKeyword>,
    ) -> Result<(), CatalogError>;
}

/// In-memory catalog store.
#[derive(Debug)]
pub struct MemoryStore {
    tx: watch::Sender<Catalog>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::default())
    }

    /// Create a store holding `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        let (tx, _) = watch::channel(catalog);
        Self { tx }
    }

    fn publish_stations(&self, stations: Vec<Station>) {
        self.tx.send_modify(|c| c.stations = Arc::new(stations));
    }

    fn publish_keywords(&self, keywords: Vec<StationKeyword>) {
        self.tx.send_modify(|c| c.keywords = Arc::new(keywords));
    }

    pub(crate) fn publish(&self, catalog: Catalog) {
        self.tx.send_replace(catalog);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationStore for MemoryStore {
    fn watch(&self) -> watch::Receiver<Catalog> {
        self.tx.subscribe()
    }

    async fn replace_stations(&self, stations: Vec<Station>) -> Result<(), CatalogError> {
        self.publish_stations(stations);
        Ok(())
    }

    async fn replace_keywords(&self, keywords: Vec<StationKeyword>) -> Result<(), CatalogError> {
        self.publish_keywords(keywords);
        Ok(())
    }

    async fn replace_catalog(
        &self,
        stations: Vec<Station>,
        keywords: Vec<StationKeyword>,
    ) -> Result<(), CatalogError> {
        self.publish(Catalog::new(stations, keywords));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn krakow() -> Station {
        Station::new(59, "Kraków Główny", 50.067192, 19.945125, 8420)
    }

    #[test]
    fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_stations_empty());
        assert!(store.is_keywords_empty());
        assert!(store.snapshot().stations.is_empty());
    }

    #[tokio::test]
    async fn replace_stations_keeps_keywords() {
        let store = MemoryStore::with_catalog(Catalog::new(
            vec![],
            vec![StationKeyword::new(1, "Kraków", 59)],
        ));

        store.replace_stations(vec![krakow()]).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.stations.as_slice(), &[krakow()]);
        assert_eq!(snapshot.keywords.len(), 1);
    }

    #[tokio::test]
    async fn replace_discards_previous_rows() {
        let store = MemoryStore::new();
        store
            .replace_stations(vec![krakow(), Station::new(60, "Katowice", 50.25, 19.01, 10)])
            .await
            .unwrap();
        store.replace_stations(vec![krakow()]).await.unwrap();

        assert_eq!(store.snapshot().stations.len(), 1);
    }

    #[tokio::test]
    async fn replace_catalog_notifies_once() {
        let store = MemoryStore::new();
        let mut rx = store.watch();
        assert!(!rx.has_changed().unwrap());

        store
            .replace_catalog(vec![krakow()], vec![StationKeyword::new(1, "Kraków", 59)])
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.stations.len(), 1);
        assert_eq!(seen.keywords.len(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn station_by_name_is_exact() {
        let catalog = Catalog::new(vec![krakow()], vec![]);
        assert!(catalog.station_by_name("Kraków Główny").is_some());
        assert!(catalog.station_by_name("krakow glowny").is_none());
        assert!(catalog.station_by_name("Kraków").is_none());
    }
}
