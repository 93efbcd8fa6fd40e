//! Container error types.

use std::error::Error;
use std::fmt;

/// Errors reported by [`ChunkVec`](crate::ChunkVec) operations.
///
/// Allocation failure is not represented here: like every `Vec`
/// allocation, running out of memory aborts the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkVecError {
    /// The container holds no elements.
    Empty,
    /// A checked access named an index at or beyond the current length.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of elements stored when the access was made.
        len: usize,
    },
    /// Appending would require a chunk beyond the configured limit.
    CapacityExceeded {
        /// The configured chunk limit.
        max_chunks: usize,
    },
    /// A [`ChunkVecConfig`](crate::ChunkVecConfig) failed validation.
    InvalidConfig {
        /// The rejected chunk limit.
        max_chunks: usize,
        /// Largest chunk limit this platform supports.
        limit: usize,
    },
}

impl fmt::Display for ChunkVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty container"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: index {index}, len {len}")
            }
            Self::CapacityExceeded { max_chunks } => {
                write!(f, "chunk capacity exceeded: limit of {max_chunks} chunks reached")
            }
            Self::InvalidConfig { max_chunks, limit } => {
                write!(
                    f,
                    "invalid config: max_chunks {max_chunks} must be between 1 and {limit}"
                )
            }
        }
    }
}

impl Error for ChunkVecError {}
