//! Autocomplete prompts for the station search boxes.
//!
//! Prompts are station names ranked by popularity. An empty query shows the
//! most popular stations; otherwise keywords are matched by prefix and
//! resolved to their stations.

mod rank;

pub use rank::{DEFAULT_EMPTY_QUERY_PROMPTS, rank_prompts};
