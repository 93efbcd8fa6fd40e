//! Logical index to chunk location mapping.
//!
//! Chunk `c` has capacity `2^(c+1)`, so the chunks before it hold
//! `2^(c+1) - 2` elements in total. Shifting a logical index by 2 lines it
//! up with a power of two: the bit length of `index + 2` names the chunk,
//! and the remainder below that power is the offset.
//!
//! ```text
//! index   0 1 | 2 3 4 5 | 6 7 8 9 10 11 12 13 | 14 ...
//! chunk   0 0 | 1 1 1 1 | 2 2 2 2  2  2  2  2 |  3 ...
//! offset  0 1 | 0 1 2 3 | 0 1 2 3  4  5  6  7 |  0 ...
//! ```

use std::fmt;

/// Capacity of the chunk at position `chunk` in the directory.
///
/// Defined for `chunk < usize::BITS - 1`.
#[inline]
pub fn chunk_capacity(chunk: usize) -> usize {
    2usize << chunk
}

/// Logical index of the first slot of chunk `chunk`.
///
/// Equivalently, the combined capacity of all chunks before it.
/// Defined for `chunk < usize::BITS`.
#[inline]
pub fn chunk_start(chunk: usize) -> usize {
    ((1usize << chunk) - 1) << 1
}

/// Physical position of a logical index: which chunk, and where inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkLocation {
    /// Position of the chunk in the directory (0-based).
    pub chunk: usize,
    /// Slot within the chunk.
    pub offset: usize,
}

impl ChunkLocation {
    /// Map a logical index to its chunk location in O(1).
    ///
    /// Returns `None` only when `index + 2` overflows `usize`; no container
    /// can hold such an index.
    #[inline]
    pub fn of(index: usize) -> Option<Self> {
        let shifted = index.checked_add(2)?;
        let k = shifted.ilog2() as usize;
        Some(Self {
            chunk: k - 1,
            offset: shifted - (1usize << k),
        })
    }

    /// The logical index this location holds.
    #[inline]
    pub fn index(&self) -> usize {
        chunk_start(self.chunk) + self.offset
    }
}

impl fmt::Display for ChunkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {} offset {}", self.chunk, self.offset)
    }
}
