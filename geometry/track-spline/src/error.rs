//! Error types for path building and distance queries.

use thiserror::Error;

/// Errors that can occur while building a path table or querying it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// Too few control points to define a path.
    #[error("insufficient control points: need at least {required}, got {actual}")]
    InsufficientControlPoints {
        /// Minimum required control points.
        required: usize,
        /// Actual number of control points provided.
        actual: usize,
    },

    /// Samples per segment must be at least 1.
    #[error("invalid sample density {0}: need at least 1 sample per segment")]
    InvalidSampleDensity(usize),

    /// A control point has a NaN or infinite coordinate.
    #[error("control point {index} has a non-finite coordinate")]
    NonFiniteControlPoint {
        /// Index of the offending control point.
        index: usize,
    },

    /// The path has no length to travel along.
    #[error("degenerate path: total arc length is {total_length}")]
    DegeneratePath {
        /// The computed total arc length.
        total_length: f64,
    },

    /// The tangent at the queried location cannot be normalized.
    #[error("degenerate tangent on segment {segment} at t={t}")]
    DegenerateTangent {
        /// Segment the query landed on.
        segment: usize,
        /// Local parameter within the segment.
        t: f64,
    },

    /// The traveled distance is NaN or infinite.
    #[error("traveled distance {0} is not finite")]
    NonFiniteDistance(f64),
}

impl PathError {
    /// Create an insufficient control points error.
    #[must_use]
    pub fn insufficient_control_points(required: usize, actual: usize) -> Self {
        Self::InsufficientControlPoints { required, actual }
    }

    /// Create a degenerate path error.
    #[must_use]
    pub fn degenerate_path(total_length: f64) -> Self {
        Self::DegeneratePath { total_length }
    }

    /// Create a degenerate tangent error.
    #[must_use]
    pub fn degenerate_tangent(segment: usize, t: f64) -> Self {
        Self::DegenerateTangent { segment, t }
    }

    /// Check if this error is raised while building a table.
    ///
    /// Build errors are final for that attempt: fix the input and rebuild.
    #[must_use]
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientControlPoints { .. }
                | Self::InvalidSampleDensity(_)
                | Self::NonFiniteControlPoint { .. }
                | Self::DegeneratePath { .. }
        )
    }

    /// Check if this error is raised by a single query on a live table.
    #[must_use]
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::DegenerateTangent { .. } | Self::NonFiniteDistance(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PathError::insufficient_control_points(2, 1);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 1"));

        let err = PathError::InvalidSampleDensity(0);
        assert!(err.to_string().contains("density 0"));

        let err = PathError::degenerate_tangent(3, 0.25);
        assert!(err.to_string().contains("segment 3"));
        assert!(err.to_string().contains("0.25"));
    }

    #[test]
    fn test_error_predicates() {
        let err = PathError::degenerate_path(0.0);
        assert!(err.is_build_error());
        assert!(!err.is_query_error());

        let err = PathError::degenerate_tangent(0, 0.0);
        assert!(err.is_query_error());
        assert!(!err.is_build_error());

        let err = PathError::NonFiniteDistance(f64::NAN);
        assert!(err.is_query_error());
    }

    #[test]
    fn test_error_constructors() {
        let err = PathError::insufficient_control_points(2, 0);
        assert!(matches!(
            err,
            PathError::InsufficientControlPoints {
                required: 2,
                actual: 0
            }
        ));
    }
}
