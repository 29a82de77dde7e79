//! Station distance finder.
//!
//! Pick two train stations through ranked, diacritic-insensitive prompts
//! and get the great-circle distance between them. The station catalog is
//! kept fresh from the Koleo API and falls back to a bundled snapshot when
//! offline.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod events;
pub mod prompts;
pub mod refresh;
pub mod session;
pub mod sync;
pub mod web;
