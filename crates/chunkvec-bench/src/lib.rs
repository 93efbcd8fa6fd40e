//! Benchmark workloads for chunkvec.
//!
//! - [`filled`]: a container of `n` sequential `u64`s.
//! - [`scattered_indices`]: every index in `0..n` exactly once, in an order
//!   that jumps between chunks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chunkvec::ChunkVec;

/// Odd multiplier for [`scattered_indices`]; coprime with every power of two.
const SCATTER_STRIDE: usize = 0x9E37_79B9;

/// Build a container holding `0..n`.
pub fn filled(n: usize) -> ChunkVec<u64> {
    (0..n as u64).collect()
}

/// A permutation of `0..n` that visits chunks out of order.
///
/// Multiplying by an odd stride modulo a power of two is a bijection, so
/// indices are generated over the next power of two and those `>= n` are
/// skipped.
pub fn scattered_indices(n: usize) -> Vec<usize> {
    let span = n.next_power_of_two();
    (0..span)
        .map(|i| i.wrapping_mul(SCATTER_STRIDE) & (span - 1))
        .filter(|&i| i < n)
        .collect()
}
