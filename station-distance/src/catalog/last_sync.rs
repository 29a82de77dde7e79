//! Persisted timestamp of the last successful remote sync.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use super::error::CatalogError;

/// Timestamp reported before any sync has been recorded.
pub const NEVER_SYNCED_MS: i64 = 0;

/// Storage for the last successful remote sync time (epoch milliseconds).
#[async_trait]
pub trait LastSyncStore: Send + Sync {
    /// Subscribe to timestamp updates.
    fn watch(&self) -> watch::Receiver<i64>;

    /// Get the current timestamp.
    fn last_sync_ms(&self) -> i64 {
        *self.watch().borrow()
    }

    /// Record a successful sync at `ms`.
    async fn set_last_sync_ms(&self, ms: i64) -> Result<(), CatalogError>;
}

/// In-memory last sync timestamp.
#[derive(Debug)]
pub struct MemoryLastSync {
    tx: watch::Sender<i64>,
}

impl MemoryLastSync {
    /// Create a store starting at `ms`.
    pub fn new(ms: i64) -> Self {
        let (tx, _) = watch::channel(ms);
        Self { tx }
    }
}

impl Default for MemoryLastSync {
    fn default() -> Self {
        Self::new(NEVER_SYNCED_MS)
    }
}

#[async_trait]
impl LastSyncStore for MemoryLastSync {
    fn watch(&self) -> watch::Receiver<i64> {
        self.tx.subscribe()
    }

    async fn set_last_sync_ms(&self, ms: i64) -> Result<(), CatalogError> {
        self.tx.send_replace(ms);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SyncState {
    last_sync_ms: i64,
}

/// Last sync timestamp stored in a small JSON file.
#[derive(Debug)]
pub struct FileLastSync {
    path: PathBuf,
    memory: MemoryLastSync,
}

impl FileLastSync {
    /// Open the timestamp file at `path`.
    ///
    /// A missing or unreadable file reads as never synced.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ms = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<SyncState>(&contents) {
                Ok(state) => state.last_sync_ms,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable sync state");
                    NEVER_SYNCED_MS
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => NEVER_SYNCED_MS,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read sync state");
                NEVER_SYNCED_MS
            }
        };

        Self {
            path,
            memory: MemoryLastSync::new(ms),
        }
    }
}

#[async_trait]
impl LastSyncStore for FileLastSync {
    fn watch(&self) -> watch::Receiver<i64> {
        self.memory.watch()
    }

    async fn set_last_sync_ms(&self, ms: i64) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogError::Cache {
                    message: format!("failed to create state directory: {}", e),
                })?;
        }

        let json = serde_json::to_string(&SyncState { last_sync_ms: ms }).map_err(|e| {
            CatalogError::Cache {
                message: format!("failed to serialize sync state: {}", e),
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, json).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| CatalogError::Cache {
                    message: format!("failed to replace sync state: {}", e),
                }),
            Err(e) => Err(CatalogError::Cache {
                message: format!("failed to write sync state: {}", e),
            }),
        };
        if written.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        written?;

        self.memory.set_last_sync_ms(ms).await
    }
}
