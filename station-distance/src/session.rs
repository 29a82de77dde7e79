//! Search box state for picking two stations.
//!
//! A [`SearchSession`] holds the two search boxes, which one has focus, and
//! the last computed distance. It reads the catalog from the store's watch
//! channel, so prompts always reflect the latest synced snapshot.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::catalog::Catalog;
use crate::domain::{DistanceError, Station, StationKeyword, distance_km, normalize};
use crate::events::{Notice, NoticeSender, emit};
use crate::prompts::{DEFAULT_EMPTY_QUERY_PROMPTS, rank_prompts};

/// Identifies one of the two search boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchBoxId {
    A,
    B,
}

impl SearchBoxId {
    /// The other search box.
    pub fn opposite(self) -> Self {
        match self {
            SearchBoxId::A => SearchBoxId::B,
            SearchBoxId::B => SearchBoxId::A,
        }
    }
}

/// Text in a search box.
///
/// `is_valid` is only set when the text came from picking a prompt, so it
/// names a station exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    pub value: String,
    pub is_valid: bool,
}

impl SearchBox {
    fn typed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: false,
        }
    }

    fn picked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: true,
        }
    }
}

/// Normalize keyword text for prefix matching.
pub fn normalize_keywords(keywords: &[StationKeyword]) -> Vec<StationKeyword> {
    keywords
        .iter()
        .map(|k| StationKeyword {
            keyword: normalize(&k.keyword),
            ..k.clone()
        })
        .collect()
}

/// Prompts for a raw search box value.
///
/// The query is trimmed and normalized before ranking; `keywords` must
/// already be normalized. Prompts equal to `opposite` (the other box's raw
/// value) are dropped so the same station is not offered twice.
pub fn search_prompts(
    stations: &[Station],
    keywords: &[StationKeyword],
    query: &str,
    opposite: &str,
    limit: usize,
) -> Vec<String> {
    let query = normalize(query.trim());
    let mut prompts = rank_prompts(stations, keywords, &query, limit);
    prompts.retain(|p| p != opposite);
    prompts
}

/// Resolve the two search box values and compute their distance.
pub fn distance_between(catalog: &Catalog, from: &str, to: &str) -> Result<f32, DistanceError> {
    let a = catalog
        .station_by_name(from)
        .ok_or_else(|| DistanceError::StationNotFound(from.to_string()))?;
    let b = catalog
        .station_by_name(to)
        .ok_or_else(|| DistanceError::StationNotFound(to.to_string()))?;
    Ok(distance_km(a, b))
}

/// State behind the two station search boxes.
pub struct SearchSession {
    catalog: watch::Receiver<Catalog>,
    snapshot: Catalog,
    normalized_keywords: Arc<Vec<StationKeyword>>,
    a: SearchBox,
    b: SearchBox,
    selected: Option<SearchBoxId>,
    distance: Option<f32>,
    notices: NoticeSender,
}

impl SearchSession {
    /// Create a session reading catalogs from `catalog`.
    pub fn new(mut catalog: watch::Receiver<Catalog>, notices: NoticeSender) -> Self {
        let snapshot = catalog.borrow_and_update().clone();
        let normalized_keywords = Arc::new(normalize_keywords(&snapshot.keywords));
        Self {
            catalog,
            snapshot,
            normalized_keywords,
            a: SearchBox::default(),
            b: SearchBox::default(),
            selected: None,
            distance: None,
            notices,
        }
    }

    /// Pick up a newer catalog snapshot, if the store published one.
    fn refresh_catalog(&mut self) {
        if !self.catalog.has_changed().unwrap_or(false) {
            return;
        }
        let latest = self.catalog.borrow_and_update().clone();
        if !Arc::ptr_eq(&latest.keywords, &self.snapshot.keywords) {
            self.normalized_keywords = Arc::new(normalize_keywords(&latest.keywords));
        }
        self.snapshot = latest;
    }

    /// Get a search box.
    pub fn search_box(&self, id: SearchBoxId) -> &SearchBox {
        match id {
            SearchBoxId::A => &self.a,
            SearchBoxId::B => &self.b,
        }
    }

    fn search_box_mut(&mut self, id: SearchBoxId) -> &mut SearchBox {
        match id {
            SearchBoxId::A => &mut self.a,
            SearchBoxId::B => &mut self.b,
        }
    }

    /// The box currently receiving prompts, if any.
    pub fn selected(&self) -> Option<SearchBoxId> {
        self.selected
    }

    /// The last computed distance in kilometres.
    pub fn distance(&self) -> Option<f32> {
        self.distance
    }

    /// Focus a search box, or clear focus with `None`.
    pub fn select(&mut self, id: Option<SearchBoxId>) {
        self.selected = id;
    }

    /// Replace a box's text as typed by the user.
    pub fn set_value(&mut self, id: SearchBoxId, value: impl Into<String>) {
        *self.search_box_mut(id) = SearchBox::typed(value);
        self.distance = None;
    }

    /// Fill the selected box with a prompt.
    pub fn pick_prompt(&mut self, prompt: impl Into<String>) {
        if let Some(id) = self.selected {
            *self.search_box_mut(id) = SearchBox::picked(prompt);
        }
    }

    /// Prompts for the selected box. Empty when nothing is selected.
    pub fn prompts(&mut self) -> Vec<String> {
        let Some(id) = self.selected else {
            return Vec::new();
        };
        self.refresh_catalog();

        search_prompts(
            &self.snapshot.stations,
            &self.normalized_keywords,
            &self.search_box(id).value,
            &self.search_box(id.opposite()).value,
            DEFAULT_EMPTY_QUERY_PROMPTS,
        )
    }

    /// Compute the distance between the stations named in the two boxes.
    ///
    /// If either name is not in the catalog, both boxes are cleared and a
    /// [`Notice::DistanceCalculationFailed`] is sent.
    pub fn calculate_distance(&mut self) -> Result<f32, DistanceError> {
        self.refresh_catalog();

        match distance_between(&self.snapshot, &self.a.value, &self.b.value) {
            Ok(km) => {
                self.distance = Some(km);
                Ok(km)
            }
            Err(e) => {
                warn!(error = %e, "distance calculation failed");
                self.a = SearchBox::default();
                self.b = SearchBox::default();
                self.distance = None;
                emit(&self.notices, Notice::DistanceCalculationFailed);
                Err(e)
            }
        }
    }
}
