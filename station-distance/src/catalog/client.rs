//! Koleo REST API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::{Station, StationKeyword};

use super::error::CatalogError;

/// Default base URL for the Koleo API.
pub const DEFAULT_BASE_URL: &str = "https://koleo.pl";

/// API version sent with every request.
const API_VERSION: &str = "1";

const STATIONS_PATH: &str = "/api/v2/main/stations";
const KEYWORDS_PATH: &str = "/api/v2/main/station_keywords";

/// Remote source of the full station and keyword catalogs.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full station catalog.
    async fn fetch_stations(&self) -> Result<Vec<Station>, CatalogError>;

    /// Fetch the full keyword catalog.
    async fn fetch_keywords(&self) -> Result<Vec<StationKeyword>, CatalogError>;
}

/// Configuration for the Koleo API client.
#[derive(Debug, Clone)]
pub struct KoleoClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `X-KOLEO-Version` header
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KoleoClientConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for KoleoClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Koleo station catalog endpoints.
#[derive(Debug, Clone)]
pub struct KoleoClient {
    http: reqwest::Client,
    base_url: String,
}

impl KoleoClient {
    /// Create a new Koleo API client.
    pub fn new(config: KoleoClientConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        let version = HeaderValue::from_str(&config.api_version).map_err(|_| CatalogError::Api {
            status: 0,
            message: "Invalid API version header".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-koleo-version"), version);

        // The API resets HTTP/2 streams for these endpoints.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .http1_only()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RemoteSource for KoleoClient {
    async fn fetch_stations(&self) -> Result<Vec<Station>, CatalogError> {
        self.get_json(STATIONS_PATH).await
    }

    async fn fetch_keywords(&self) -> Result<Vec<StationKeyword>, CatalogError> {
        self.get_json(KEYWORDS_PATH).await
    }
}
