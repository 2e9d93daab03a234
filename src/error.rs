//! Error types for segment exploration.

use thiserror::Error;

/// Opaque error raised by a search or lookup collaborator.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while projecting, filtering or exploring segments.
///
/// A lookup that finds no segment is not an error: collaborators report it
/// as `Ok(None)` and the sweep skips it.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// A bearing name that does not map to a known compass direction.
    #[error("invalid bearing {0:?} (expected north_east or south_west)")]
    InvalidBearing(String),

    /// Bounds that do not contain exactly four components.
    #[error("bounds should have 4 components (sw_lat, sw_lng, ne_lat, ne_lng), got {components}")]
    InvalidBounds { components: usize },

    /// A coordinate that is malformed or outside the valid degree range.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A sweep step of zero kilometers.
    #[error("step must be at least 1 km")]
    InvalidStep,

    /// A band width that is negative, infinite or not a number.
    #[error("within must be a finite, non-negative distance in km, got {0}")]
    InvalidWithin(f64),

    /// Failure reported by the search or lookup collaborator, passed through as is.
    #[error("collaborator failed: {0}")]
    Collaborator(#[source] CollaboratorError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExploreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExploreError::InvalidBounds { components: 3 };
        assert!(err.to_string().contains("got 3"));

        let err = ExploreError::InvalidBearing("up".to_string());
        assert!(err.to_string().contains("\"up\""));

        let err = ExploreError::InvalidWithin(-1.0);
        assert!(err.to_string().contains("got -1"));
    }

    #[test]
    fn test_collaborator_source_is_kept() {
        use std::error::Error as _;

        let inner: CollaboratorError = "token expired".into();
        let err = ExploreError::Collaborator(inner);
        assert_eq!(err.source().map(|e| e.to_string()), Some("token expired".to_string()));
    }
}
