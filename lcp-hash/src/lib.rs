//! Label interning for the LCP engine: a shared, deduplicating map mode and
//! a stateless MurmurHash3-32 hash mode.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Interner  (str_map, cores_map,          │  C3 map mode
//! │             next_id; emplace_string,     │
//! │             emplace_tuple)               │
//! ├─────────────────────────────────────────┤
//! │  LabelMode  (Map(&Interner) | Hash)       │  per-operation selector
//! ├─────────────────────────────────────────┤
//! │  murmur3_32 / murmur3_32_tuple            │  MurmurHash3-32, seed 42
//! └─────────────────────────────────────────┘
//! ```
//!
//! This crate has no knowledge of cores or the pattern parser; it only
//! assigns dense `u32` ids to byte strings and `u32` tuples.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod interner;
mod murmur3;

pub use error::{Error, Result};
pub use interner::{Interner, LabelMode, DEFAULT_CORE_CAPACITY, DEFAULT_STR_CAPACITY};
pub use murmur3::{murmur3_32, murmur3_32_tuple, murmur3_32_with_seed, SEED};

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{Error, Interner, LabelMode, Result};
}
