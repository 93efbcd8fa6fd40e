//! Reusable container fixtures.
//!
//! - [`Record`]: element with an integer key and a float payload.
//! - [`reference_records`]: the 103-element scenario (1, 2, 3, then 0..100).
//! - [`numbered`]: `n` sequential integers.

use chunkvec::ChunkVec;

/// Element type for scenario tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub a: i32,
    pub b: f32,
}

impl Record {
    /// Record whose payload mirrors its key.
    pub fn new(a: i32) -> Self {
        Self { a, b: a as f32 }
    }
}

/// Container holding `{1, 2, 3}` followed by `{0..100}`, 103 records total.
pub fn reference_records() -> ChunkVec<Record> {
    let mut cv = ChunkVec::new();
    for a in 1..=3 {
        cv.push(Record::new(a));
    }
    for a in 0..100 {
        cv.push(Record::new(a));
    }
    cv
}

/// Container holding `0..n`.
pub fn numbered(n: usize) -> ChunkVec<usize> {
    (0..n).collect()
}

/// `(capacity, len)` for every chunk in allocation order.
pub fn layout<T>(cv: &ChunkVec<T>) -> Vec<(usize, usize)> {
    cv.chunk_infos().map(|c| (c.capacity, c.len)).collect()
}

/// Assert the chunk layout, reporting the full layout on mismatch.
#[track_caller]
pub fn assert_layout<T>(cv: &ChunkVec<T>, expected: &[(usize, usize)]) {
    let actual = layout(cv);
    assert_eq!(
        actual, expected,
        "chunk layout mismatch (capacity, len): got {actual:?}, expected {expected:?}"
    );
}
