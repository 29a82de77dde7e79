//! Catalog error types.

/// Errors that can occur when reading or writing station catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a seed file
    #[error("seed error: {message}")]
    Seed { message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = CatalogError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = CatalogError::Seed {
            message: "stations.json missing".into(),
        };
        assert_eq!(err.to_string(), "seed error: stations.json missing");

        let err = CatalogError::Cache {
            message: "disk full".into(),
        };
        assert_eq!(err.to_string(), "cache error: disk full");
    }
}
