//! Container configuration parameters.

use crate::error::ChunkVecError;
use crate::location::chunk_start;

/// Configuration for a [`ChunkVec`](crate::ChunkVec).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkVecConfig {
    /// Maximum number of chunks the container may allocate.
    ///
    /// Default: [`ChunkVecConfig::MAX_CHUNKS`]. With the default the limit
    /// is never the binding constraint; allocation fails first.
    pub max_chunks: usize,
}

impl ChunkVecConfig {
    /// Largest chunk count whose cumulative capacity fits in `usize`.
    ///
    /// `n` chunks hold `2^(n+1) - 2` elements, so `n = usize::BITS - 1`.
    pub const MAX_CHUNKS: usize = (usize::BITS - 1) as usize;

    /// Default chunk limit.
    pub const DEFAULT_MAX_CHUNKS: usize = Self::MAX_CHUNKS;

    /// Create a config with the given chunk limit.
    pub fn new(max_chunks: usize) -> Self {
        Self { max_chunks }
    }

    /// Check that the chunk limit is in `1..=MAX_CHUNKS`.
    pub fn validate(&self) -> Result<(), ChunkVecError> {
        if self.max_chunks == 0 || self.max_chunks > Self::MAX_CHUNKS {
            return Err(ChunkVecError::InvalidConfig {
                max_chunks: self.max_chunks,
                limit: Self::MAX_CHUNKS,
            });
        }
        Ok(())
    }

    /// Total element capacity once all `max_chunks` chunks are allocated.
    ///
    /// Only meaningful for a validated config.
    pub fn max_capacity(&self) -> usize {
        chunk_start(self.max_chunks)
    }
}

impl Default for ChunkVecConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CHUNKS)
    }
}
