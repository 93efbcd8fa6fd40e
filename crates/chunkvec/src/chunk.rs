//! Fixed-capacity storage blocks.
//!
//! A [`Chunk`] is a `Vec<T>` reserved to its full capacity at creation and
//! filled append-only. Because it never grows past that reservation, the
//! backing buffer is never reallocated and element addresses are stable.

use std::fmt;

/// A single fixed-capacity block of elements.
///
/// Chunks are the storage unit of a [`ChunkVec`](crate::ChunkVec). They are
/// never cleared, shrunk, or reallocated while their owner lives.
pub struct Chunk<T> {
    /// Backing storage, reserved to at least `capacity` at creation.
    data: Vec<T>,
    /// Logical capacity. `Vec::with_capacity` may over-reserve (and does for
    /// zero-sized `T`), so the requested value is kept separately.
    capacity: usize,
}

impl<T> Chunk<T> {
    /// Create an empty chunk with room for exactly `capacity` elements.
    ///
    /// Allocation failure aborts.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value` if there is room.
    ///
    /// Returns a reference to the stored element, or hands `value` back
    /// when the chunk is full.
    pub fn try_push(&mut self, value: T) -> Result<&mut T, T> {
        let slot = self.data.len();
        if slot >= self.capacity {
            return Err(value);
        }
        self.data.push(value);
        Ok(&mut self.data[slot])
    }

    /// Shared access to the element at `offset`.
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.data.get(offset)
    }

    /// Mutable access to the element at `offset`.
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.data.get_mut(offset)
    }

    /// The filled part of the chunk.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The filled part of the chunk, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The most recently appended element.
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// The most recently appended element, mutably.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// Number of elements stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no element has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity in elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots left.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Bytes of element storage this chunk accounts for.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// Consume the chunk, yielding its elements.
    pub(crate) fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Clone for Chunk<T> {
    /// Deep copy with the same capacity.
    ///
    /// `Vec::clone` only reserves the source length, which would let the
    /// copy reallocate on its next push.
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Chunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("capacity", &self.capacity)
            .field("data", &self.data)
            .finish()
    }
}
