//! Domain error types.
//!
//! These errors describe lookups against the current station catalog.
//! They are distinct from catalog I/O errors.

/// Errors from computing the distance between two selected stations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistanceError {
    /// A search box value does not name a station in the catalog
    #[error("station not found in catalog: {0:?}")]
    StationNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DistanceError::StationNotFound("Kraków Główny".into());
        assert_eq!(
            err.to_string(),
            "station not found in catalog: \"Kraków Główny\""
        );
    }
}
