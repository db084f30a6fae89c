//! Error types for mesh storage and import.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building, validating or importing a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Vertex or edge storage could not be grown.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The mesh already holds as many vertices as an index can address.
    #[error("vertex capacity exceeded: at most {limit} vertices")]
    CapacityExceeded {
        /// Largest supported vertex count.
        limit: usize,
    },

    /// An edge references a vertex the mesh does not have.
    #[error("edge {edge} references a vertex outside 0..{vertex_count}")]
    EdgeOutOfBounds {
        /// Position of the offending edge in storage order.
        edge: usize,
        /// Vertex count at the time of the check.
        vertex_count: usize,
    },

    /// Mesh file not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A face line references a vertex that has not been defined.
    #[error("line {line}: vertex reference {index} is outside 1..={vertex_count}")]
    VertexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Reference as written in the file.
        index: String,
        /// Vertices defined so far.
        vertex_count: usize,
    },

    /// A line could not be parsed (strict import only).
    #[error("line {line}: {message}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Create a `MalformedLine` error.
    #[must_use]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::malformed(7, "expected three coordinates");
        assert_eq!(format!("{err}"), "line 7: expected three coordinates");

        let err = MeshError::VertexOutOfRange {
            line: 4,
            index: "9".to_string(),
            vertex_count: 3,
        };
        assert!(format!("{err}").contains("outside 1..=3"));

        let err = MeshError::EdgeOutOfBounds {
            edge: 2,
            vertex_count: 5,
        };
        assert!(format!("{err}").contains("edge 2"));
    }

    #[test]
    fn test_allocation_error_conversion() {
        let mut storage: Vec<u64> = Vec::new();
        let reserve_err = storage.try_reserve(usize::MAX).unwrap_err();
        let err: MeshError = reserve_err.into();
        assert!(matches!(err, MeshError::Allocation(_)));
    }
}
