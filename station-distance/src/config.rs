//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{BUNDLED_SEED_DIR, DEFAULT_BASE_URL};

/// Default address the HTTP API binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default host probed to decide whether the remote API is reachable.
pub const DEFAULT_PROBE_ADDR: &str = "koleo.pl:443";

/// Errors from reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Settings for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the station API.
    pub api_url: String,

    /// Directory holding the catalog cache and the last sync timestamp.
    pub data_dir: PathBuf,

    /// Directory holding the seed snapshot. Defaults to the one shipped with
    /// the crate, independent of the working directory.
    pub seed_dir: PathBuf,

    /// Address the HTTP API listens on.
    pub listen_addr: SocketAddr,

    /// `host:port` probed for connectivity before each sync.
    pub probe_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("data/cache"),
            seed_dir: PathBuf::from(BUNDLED_SEED_DIR),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            probe_addr: DEFAULT_PROBE_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from `STATIONS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using `lookup` to resolve variables.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("STATIONS_API_URL") {
            config.api_url = url;
        }
        if let Some(dir) = get("STATIONS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("STATIONS_SEED_DIR") {
            config.seed_dir = PathBuf::from(dir);
        }
        if let Some(addr) = get("STATIONS_LISTEN_ADDR") {
            config.listen_addr = addr.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "STATIONS_LISTEN_ADDR",
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(addr) = get("STATIONS_PROBE_ADDR") {
            config.probe_addr = addr;
        }

        Ok(config)
    }

    /// Path of the last sync timestamp file.
    pub fn last_sync_path(&self) -> PathBuf {
        self.data_dir.join("last_sync.json")
    }
}
