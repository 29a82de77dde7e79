//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::sync::SyncOutcome;

/// Query for station prompts.
#[derive(Debug, Default, Deserialize)]
pub struct PromptsRequest {
    /// Text typed into the search box
    #[serde(default)]
    pub q: String,

    /// Value of the other search box, never offered back
    #[serde(default)]
    pub exclude: String,

    /// Maximum number of prompts (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Ranked station prompts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PromptsResponse {
    pub prompts: Vec<String>,
}

/// Query for the distance between two stations.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    /// Exact name of the first station
    pub from: String,

    /// Exact name of the second station
    pub to: String,
}

/// Distance between two stations.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    pub distance_km: f32,
}

/// Catalog and sync state.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether a sync is currently doing work
    pub updating: bool,

    /// Epoch milliseconds of the last successful remote sync (0 if never)
    pub last_sync_ms: i64,

    /// Number of stations in the catalog
    pub stations: usize,

    /// Number of keywords in the catalog
    pub keywords: usize,
}

/// Result of a manually triggered sync.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub outcome: SyncOutcome,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
