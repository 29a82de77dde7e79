//! Station catalog types.

use serde::{Deserialize, Serialize};

/// A named geographic point in the station catalog.
///
/// `hits` is a popularity score used to order prompts. Stations are
/// immutable once loaded; a sync replaces the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub hits: i32,
}

impl Station {
    /// Create a station from its parts.
    pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64, hits: i32) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
            hits,
        }
    }
}

/// A searchable alias pointing at exactly one station.
///
/// Many keywords may reference the same station. A keyword whose
/// `station_id` does not resolve is skipped by prompt ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationKeyword {
    pub id: i64,
    pub keyword: String,
    pub station_id: i64,
}

impl StationKeyword {
    /// Create a keyword from its parts.
    pub fn new(id: i64, keyword: impl Into<String>, station_id: i64) -> Self {
        Self {
            id,
            keyword: keyword.into(),
            station_id,
        }
    }
}
