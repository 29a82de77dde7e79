//! Keeps the local station catalog fresh.
//!
//! A sync checks connectivity once, then either refreshes both catalogs
//! from the remote API (when the last refresh is older than the refresh
//! interval) or falls back to the bundled seed for any catalog that is
//! still empty. Failures are reported as notices, never as faults.

mod orchestrator;

pub use orchestrator::{SeedOutcome, SyncOrchestrator, SyncOutcome, SyncSources};
