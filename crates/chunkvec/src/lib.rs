//! Growable append-only vector with stable element addresses.
//!
//! [`ChunkVec`] stores elements in a directory of fixed-capacity chunks whose
//! capacities double (2, 4, 8, ...). Growing allocates a new chunk instead of
//! reallocating, so an element never moves once stored. Useful wherever code
//! keeps indices or addresses into a pool that is still being appended to.
//!
//! # Architecture
//!
//! ```text
//! ChunkVec<T>
//! ├── ChunkVecConfig (chunk limit, validated at construction)
//! └── SmallVec<Chunk<T>> (directory, allocation order)
//!     └── Chunk<T> × n (Vec<T> reserved to 2^(k+1), append-only)
//! ```
//!
//! Logical index `i` maps to chunk `ilog2(i + 2) - 1`, offset
//! `i + 2 - 2^ilog2(i + 2)` (see [`location`]).
//!
//! # Not provided
//!
//! Removal, insertion in the middle, shrinking, and internal locking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod iter;
pub mod location;
pub mod vec;

// Public re-exports for the primary API surface.
pub use chunk::Chunk;
pub use config::ChunkVecConfig;
pub use error::ChunkVecError;
pub use iter::{IntoIter, Iter, IterMut};
pub use location::ChunkLocation;
pub use vec::{ChunkInfo, ChunkVec};
