//! The chunked append vector.
//!
//! [`ChunkVec`] owns a directory of [`Chunk`]s with capacities 2, 4, 8, ...
//! When the last chunk is full the next one is allocated at double the
//! capacity; existing chunks are never touched, so an element keeps its
//! address for the lifetime of the container.

use std::fmt;
use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

use crate::chunk::Chunk;
use crate::config::ChunkVecConfig;
use crate::error::ChunkVecError;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::location::{chunk_start, ChunkLocation};

/// Chunks kept inline before the directory spills to the heap.
///
/// Eight chunks hold 510 elements.
const INLINE_CHUNKS: usize = 8;

/// Backing array type for the chunk directory.
pub(crate) type ChunkDir<T> = [Chunk<T>; INLINE_CHUNKS];

/// Capacity of the chunk allocated at construction.
const FIRST_CHUNK_CAPACITY: usize = 2;

/// A growable, append-only sequence that never relocates its elements.
///
/// Storage is a list of fixed-capacity chunks whose capacities double
/// (2, 4, 8, ...). Logical index `i` lives in chunk `ilog2(i + 2) - 1`, so
/// indexed access is O(1) and appends are O(1) amortized without ever
/// copying existing elements.
///
/// # Stability
///
/// Appending never moves stored elements. Indices stay valid forever, and
/// an element's address (`&cv[i] as *const T`) is the same before and after
/// any number of later pushes.
///
/// # Thread safety
///
/// No internal synchronization. Mutation takes `&mut self`; share across
/// threads only behind an external lock.
///
/// # Example
///
/// ```
/// use chunkvec::ChunkVec;
///
/// let mut cv = ChunkVec::new();
/// cv.push(1);
/// cv.push(2);
/// let first = &cv[0] as *const i32;
/// for i in 3..100 {
///     cv.push(i);
/// }
/// assert_eq!(&cv[0] as *const i32, first);
/// assert_eq!(cv.len(), 99);
/// ```
pub struct ChunkVec<T> {
    chunks: SmallVec<ChunkDir<T>>,
    /// Capacity of the next chunk to allocate.
    next_capacity: usize,
    len: usize,
    config: ChunkVecConfig,
}

/// Read-only summary of one chunk, for inspecting the storage layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Position in the chunk directory.
    pub index: usize,
    /// Logical index of the chunk's first slot.
    pub start: usize,
    /// Fixed capacity in elements.
    pub capacity: usize,
    /// Elements stored.
    pub len: usize,
}

impl<T> ChunkVec<T> {
    /// Create an empty container with one chunk of capacity 2.
    pub fn new() -> Self {
        Self::with_valid_config(ChunkVecConfig::default())
    }

    /// Create an empty container with a custom configuration.
    pub fn with_config(config: ChunkVecConfig) -> Result<Self, ChunkVecError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ChunkVecConfig) -> Self {
        let mut chunks = SmallVec::new();
        chunks.push(Chunk::new(FIRST_CHUNK_CAPACITY));
        Self {
            chunks,
            next_capacity: FIRST_CHUNK_CAPACITY * 2,
            len: 0,
            config,
        }
    }

    /// Append `value` and return a reference to where it was stored.
    ///
    /// Allocates a new chunk of double capacity when the last one is full.
    ///
    /// # Panics
    ///
    /// Panics if the configured chunk limit is reached. With the default
    /// configuration allocation fails (and aborts) long before that.
    pub fn push(&mut self, value: T) -> &mut T {
        match self.try_push(value) {
            Ok(slot) => slot,
            Err(err) => panic!("ChunkVec::push: {err}"),
        }
    }

    /// Append `value`, or report that the chunk limit has been reached.
    ///
    /// On `Err` the container is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<&mut T, ChunkVecError> {
        if self.current_chunk().is_full() {
            self.expand()?;
        }
        let last = self.chunks.len() - 1;
        match self.chunks[last].try_push(value) {
            Ok(slot) => {
                self.len += 1;
                Ok(slot)
            }
            Err(_) => unreachable!("last chunk has room after expand"),
        }
    }

    /// Allocate the next chunk.
    fn expand(&mut self) -> Result<(), ChunkVecError> {
        if self.chunks.len() >= self.config.max_chunks {
            return Err(ChunkVecError::CapacityExceeded {
                max_chunks: self.config.max_chunks,
            });
        }
        self.chunks.push(Chunk::new(self.next_capacity));
        // Saturates only once the directory is at MAX_CHUNKS, where the
        // check above stops any further expansion.
        self.next_capacity = self.next_capacity.checked_mul(2).unwrap_or(usize::MAX);
        Ok(())
    }

    fn current_chunk(&self) -> &Chunk<T> {
        &self.chunks[self.chunks.len() - 1]
    }

    /// The most recently appended element.
    pub fn last(&self) -> Result<&T, ChunkVecError> {
        self.current_chunk().last().ok_or(ChunkVecError::Empty)
    }

    /// The most recently appended element, mutably.
    pub fn last_mut(&mut self) -> Result<&mut T, ChunkVecError> {
        let last = self.chunks.len() - 1;
        self.chunks[last].last_mut().ok_or(ChunkVecError::Empty)
    }

    /// Element at logical index `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let location = self.location_of(index)?;
        self.chunks[location.chunk].get(location.offset)
    }

    /// Mutable element at logical index `index`, or `None` past the end.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let location = self.location_of(index)?;
        self.chunks[location.chunk].get_mut(location.offset)
    }

    /// Bounds-checked access reporting [`ChunkVecError::IndexOutOfRange`].
    pub fn at(&self, index: usize) -> Result<&T, ChunkVecError> {
        let len = self.len;
        self.get(index)
            .ok_or(ChunkVecError::IndexOutOfRange { index, len })
    }

    /// Bounds-checked mutable access reporting [`ChunkVecError::IndexOutOfRange`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ChunkVecError> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(ChunkVecError::IndexOutOfRange { index, len })
    }

    /// Index of the first element matching `predicate`, scanning upward.
    pub fn find<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(|item| predicate(item))
    }

    /// First element matching `predicate`, for in-place edits.
    pub fn find_mut<F>(&mut self, mut predicate: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|item| predicate(item))
    }

    /// Call `visitor` on every element in ascending index order.
    pub fn each<F>(&mut self, visitor: F)
    where
        F: FnMut(&mut T),
    {
        self.iter_mut().for_each(visitor);
    }

    /// Iterate over shared references in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.chunks, self.len)
    }

    /// Iterate over mutable references in index order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.chunks, self.len)
    }

    /// Number of elements stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total element capacity of the chunks allocated so far.
    pub fn capacity(&self) -> usize {
        chunk_start(self.chunks.len())
    }

    /// Chunk location of an in-range index.
    #[inline]
    pub fn location_of(&self, index: usize) -> Option<ChunkLocation> {
        if index >= self.len {
            return None;
        }
        ChunkLocation::of(index)
    }

    /// Number of chunks allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Layout summary of chunk `index`.
    pub fn chunk_info(&self, index: usize) -> Option<ChunkInfo> {
        let chunk = self.chunks.get(index)?;
        Some(ChunkInfo {
            index,
            start: chunk_start(index),
            capacity: chunk.capacity(),
            len: chunk.len(),
        })
    }

    /// Layout summaries of all chunks in allocation order.
    pub fn chunk_infos(&self) -> impl Iterator<Item = ChunkInfo> + '_ {
        (0..self.chunks.len()).filter_map(move |index| self.chunk_info(index))
    }

    /// Capacity the next allocated chunk will have.
    pub fn next_chunk_capacity(&self) -> usize {
        self.next_capacity
    }

    /// Bytes of element storage across all chunks.
    pub fn memory_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::memory_bytes).sum()
    }

    /// The configuration this container was built with.
    pub fn config(&self) -> &ChunkVecConfig {
        &self.config
    }
}

impl<T> Default for ChunkVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ChunkVec<T> {
    /// Deep copy: every chunk is duplicated with its capacity, so the copy
    /// has the same layout and shares no storage with `self`.
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks.iter().cloned().collect(),
            next_capacity: self.next_capacity,
            len: self.len,
            config: self.config.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ChunkVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ChunkVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ChunkVec<T> {}

impl<T> Index<usize> for ChunkVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!(
                "{}",
                ChunkVecError::IndexOutOfRange {
                    index,
                    len: self.len,
                }
            ),
        }
    }
}

impl<T> IndexMut<usize> for ChunkVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("{}", ChunkVecError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T> Extend<T> for ChunkVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for ChunkVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut cv = Self::new();
        cv.extend(iter);
        cv
    }
}

impl<T> IntoIterator for ChunkVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.chunks, self.len)
    }
}

impl<'a, T> IntoIterator for &'a ChunkVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ChunkVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout<T>(cv: &ChunkVec<T>) -> Vec<(usize, usize)> {
        cv.chunk_infos().map(|c| (c.capacity, c.len)).collect()
    }

    #[test]
    fn new_has_one_empty_chunk_of_two() {
        let cv: ChunkVec<u8> = ChunkVec::new();
        assert_eq!(cv.len(), 0);
        assert!(cv.is_empty());
        assert_eq!(cv.chunk_count(), 1);
        assert_eq!(layout(&cv), vec![(2, 0)]);
        assert_eq!(cv.capacity(), 2);
        assert_eq!(cv.next_chunk_capacity(), 4);
    }

    #[test]
    fn third_push_allocates_second_chunk() {
        let mut cv = ChunkVec::new();
        cv.push(1);
        cv.push(2);
        assert_eq!(layout(&cv), vec![(2, 2)]);
        cv.push(3);
        assert_eq!(layout(&cv), vec![(2, 2), (4, 1)]);
        assert_eq!(cv.len(), 3);
        assert_eq!(cv.next_chunk_capacity(), 8);
    }

    #[test]
    fn chunk_allocated_exactly_when_previous_is_full() {
        let mut cv = ChunkVec::new();
        for i in 0..62usize {
            cv.push(i);
            let expected_chunks = ChunkLocation::of(i).unwrap().chunk + 1;
            assert_eq!(cv.chunk_count(), expected_chunks, "after push {i}");
        }
        // 2 + 4 + 8 + 16 + 32 = 62: every chunk full.
        assert!(cv.chunk_infos().all(|c| c.len == c.capacity));
        cv.push(62);
        assert_eq!(cv.chunk_info(5).unwrap().capacity, 64);
    }

    #[test]
    fn push_returns_reference_into_storage() {
        let mut cv = ChunkVec::new();
        *cv.push(10) += 1;
        assert_eq!(cv[0], 11);
    }

    #[test]
    fn last_on_empty_is_error() {
        let mut cv: ChunkVec<i32> = ChunkVec::new();
        assert_eq!(cv.last(), Err(ChunkVecError::Empty));
        assert_eq!(cv.last_mut(), Err(ChunkVecError::Empty));
    }

    #[test]
    fn last_tracks_most_recent_push_across_chunks() {
        let mut cv = ChunkVec::new();
        for i in 0..7 {
            cv.push(i);
            assert_eq!(cv.last(), Ok(&i));
        }
        *cv.last_mut().unwrap() = 70;
        assert_eq!(cv[6], 70);
    }

    #[test]
    fn at_reports_out_of_range() {
        let mut cv = ChunkVec::new();
        cv.push('a');
        assert_eq!(cv.at(0), Ok(&'a'));
        assert_eq!(
            cv.at(1),
            Err(ChunkVecError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            cv.at_mut(usize::MAX),
            Err(ChunkVecError::IndexOutOfRange {
                index: usize::MAX,
                len: 1,
            })
        );
    }

    #[test]
    fn get_past_len_inside_allocated_chunk_is_none() {
        let mut cv = ChunkVec::new();
        cv.push(1);
        cv.push(2);
        cv.push(3);
        // Index 3 maps into chunk 1, which has spare capacity.
        assert_eq!(cv.get(3), None);
        assert_eq!(cv.location_of(3), None);
        assert_eq!(
            cv.location_of(2),
            Some(ChunkLocation {
                chunk: 1,
                offset: 0,
            })
        );
    }

    #[test]
    #[should_panic(expected = "index out of range: index 5, len 0")]
    fn index_operator_panics_out_of_range() {
        let cv: ChunkVec<u8> = ChunkVec::new();
        let _ = cv[5];
    }

    #[test]
    fn find_returns_first_match() {
        let cv: ChunkVec<i32> = [3, 1, 4, 1, 5].into_iter().collect();
        assert_eq!(cv.find(|&v| v == 1), Some(1));
        assert_eq!(cv.find(|&v| v > 3), Some(2));
        assert_eq!(cv.find(|&v| v < 0), None);
    }

    #[test]
    fn find_on_empty_is_none() {
        let cv: ChunkVec<i32> = ChunkVec::new();
        assert_eq!(cv.find(|_| true), None);
    }

    #[test]
    fn find_mut_edits_first_match() {
        let mut cv: ChunkVec<i32> = (0..10).collect();
        *cv.find_mut(|&v| v % 4 == 3).unwrap() = -1;
        assert_eq!(cv[3], -1);
        assert_eq!(cv[7], 7);
    }

    #[test]
    fn each_visits_in_index_order() {
        let mut cv: ChunkVec<usize> = (0..20).collect();
        let mut seen = Vec::new();
        cv.each(|v| {
            seen.push(*v);
            *v += 100;
        });
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        assert_eq!(cv[0], 100);
    }

    #[test]
    fn capacity_and_memory_follow_chunks() {
        let cv: ChunkVec<u64> = (0..7).collect();
        // chunks 2 + 4 + 8
        assert_eq!(cv.capacity(), 14);
        assert_eq!(cv.memory_bytes(), 14 * 8);
    }

    #[test]
    fn chunk_info_reports_start() {
        let cv: ChunkVec<u8> = (0..20).collect();
        let info = cv.chunk_info(3).unwrap();
        assert_eq!(
            info,
            ChunkInfo {
                index: 3,
                start: 14,
                capacity: 16,
                len: 6,
            }
        );
        assert_eq!(cv.chunk_info(4), None);
    }

    #[test]
    fn try_push_respects_chunk_limit() {
        let mut cv = ChunkVec::with_config(ChunkVecConfig::new(2)).unwrap();
        for i in 0..6 {
            cv.try_push(i).unwrap();
        }
        assert_eq!(
            cv.try_push(6),
            Err(ChunkVecError::CapacityExceeded { max_chunks: 2 })
        );
        assert_eq!(cv.len(), 6);
        assert_eq!(cv.chunk_count(), 2);
        assert_eq!(cv.last(), Ok(&5));
    }

    #[test]
    #[should_panic(expected = "chunk capacity exceeded")]
    fn push_panics_past_chunk_limit() {
        let mut cv = ChunkVec::with_config(ChunkVecConfig::new(1)).unwrap();
        cv.push(0);
        cv.push(1);
        cv.push(2);
    }

    #[test]
    fn with_config_rejects_invalid() {
        let result = ChunkVec::<u8>::with_config(ChunkVecConfig::new(0));
        assert!(matches!(result, Err(ChunkVecError::InvalidConfig { .. })));
    }

    #[test]
    fn clone_copies_layout() {
        let cv: ChunkVec<String> = (0..9).map(|i| i.to_string()).collect();
        let copy = cv.clone();
        assert_eq!(layout(&copy), layout(&cv));
        assert_eq!(copy.next_chunk_capacity(), cv.next_chunk_capacity());
        assert_eq!(copy, cv);
        assert_ne!(&copy[0] as *const String, &cv[0] as *const String);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source: ChunkVec<i32> = (0..5).collect();
        let mut target: ChunkVec<i32> = (100..130).collect();
        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(layout(&target), layout(&source));
    }

    #[test]
    fn debug_prints_as_list() {
        let cv: ChunkVec<i32> = (1..4).collect();
        assert_eq!(format!("{cv:?}"), "[1, 2, 3]");
    }

    #[test]
    fn zero_sized_elements() {
        let mut cv = ChunkVec::new();
        for _ in 0..100 {
            cv.push(());
        }
        assert_eq!(cv.len(), 100);
        assert_eq!(cv.chunk_count(), 6);
        assert_eq!(cv.memory_bytes(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reads_match_pushes(values in proptest::collection::vec(any::<i64>(), 0..300)) {
                let mut cv = ChunkVec::new();
                for &v in &values {
                    cv.push(v);
                }
                prop_assert_eq!(cv.len(), values.len());
                for (i, v) in values.iter().enumerate() {
                    prop_assert_eq!(cv.get(i), Some(v));
                }
                prop_assert_eq!(cv.get(values.len()), None);
            }

            #[test]
            fn layout_invariants_hold(n in 0usize..600) {
                let cv: ChunkVec<u16> = (0..n).map(|i| i as u16).collect();
                let infos: Vec<ChunkInfo> = cv.chunk_infos().collect();
                let total: usize = infos.iter().map(|c| c.len).sum();
                prop_assert_eq!(total, n);
                for (k, info) in infos.iter().enumerate() {
                    prop_assert_eq!(info.capacity, 1usize << (k + 1));
                    if k + 1 < infos.len() {
                        prop_assert_eq!(info.len, info.capacity);
                    }
                }
            }

            #[test]
            fn addresses_survive_growth(first in 1usize..50, more in 1usize..500) {
                let mut cv: ChunkVec<u32> = (0..first as u32).collect();
                let before: Vec<*const u32> = cv.iter().map(|v| v as *const u32).collect();
                for i in 0..more {
                    cv.push(i as u32);
                }
                let after: Vec<*const u32> =
                    cv.iter().take(first).map(|v| v as *const u32).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}
