//! Alphabet encoding and bit-packed core representation for the LCP engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Alphabet  (byte -> code, rc-code, w)    │  C1
//! ├─────────────────────────────────────────┤
//! │  Core  (bit_size, bit_rep, label,        │  C2
//! │         start, end; pack/compress/(de)   │
//! │         serialize/compare)               │
//! ├─────────────────────────────────────────┤
//! │  LcpConfig  (tunable constants)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! This crate has no knowledge of the pattern parser (`lcp-parse`) or the
//! label interner (`lcp-hash`); `Core::pack` takes an already-computed label
//! so those concerns stay decoupled.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod alphabet;
mod config;
mod core_repr;
mod error;

pub use alphabet::Alphabet;
pub use config::{LcpConfig, DCT_ITERATION_COUNT, UBLOCK_BIT_SIZE};
pub use core_repr::{Core, PackElement};
pub use error::{Error, Result};

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{Alphabet, Core, Error, LcpConfig, PackElement, Result};
}
