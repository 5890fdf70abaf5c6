//! Error types for geometry operations.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

/// Errors produced by the geometry leaves (buffer and union).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Malformed or degenerate input. Surfaced to the caller; no state changes.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Topology failure while merging two shapes.
    ///
    /// Recovered by [`union`](super::union) which keeps the existing area.
    #[error("Failed to merge geometries: {0}")]
    MergeFailure(String),
}

/// Runs a call into the boolean-ops backend, turning a panic into an error
/// message naming `operation`.
pub(crate) fn contain_panic<T>(operation: &str, f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| format!("{} panicked", operation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_panic_passes_value_through() {
        assert_eq!(contain_panic("buffer", || 42), Ok(42));
    }

    #[test]
    fn test_contain_panic_reports_operation() {
        let result: Result<(), String> = contain_panic("path buffering", || panic!("backend"));
        assert_eq!(result, Err("path buffering panicked".to_string()));
    }

    #[test]
    fn test_display_invalid_geometry() {
        let err = GeometryError::InvalidGeometry("path has 1 distinct point".to_string());
        assert!(err.to_string().contains("Invalid geometry"));
        assert!(err.to_string().contains("1 distinct point"));
    }

    #[test]
    fn test_display_merge_failure() {
        let err = GeometryError::MergeFailure("boolean union panicked".to_string());
        assert!(err.to_string().contains("merge"));
    }
}
