//! Station catalog sources and local storage.
//!
//! The catalog comes from three places: the Koleo REST API, a bundled seed
//! snapshot for offline first runs, and a local store holding whatever was
//! loaded last. Each is behind a trait so the sync logic can be exercised
//! with in-memory stand-ins.

mod cache;
mod client;
mod connectivity;
mod error;
mod last_sync;
mod seed;
mod store;

pub use cache::DiskStore;
pub use client::{DEFAULT_BASE_URL, KoleoClient, KoleoClientConfig, RemoteSource};
pub use connectivity::{Connectivity, FixedConnectivity, TcpProbe};
pub use error::CatalogError;
pub use last_sync::{FileLastSync, LastSyncStore, MemoryLastSync, NEVER_SYNCED_MS};
pub use seed::{BUNDLED_SEED_DIR, KEYWORDS_FILE, STATIONS_FILE, SeedFiles, SeedSource};
pub use store::{Catalog, MemoryStore, StationStore};
