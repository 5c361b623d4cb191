//! Hierarchical Locally Consistent Parsing for genomic alphabet strings.
//!
//! Given a byte string over a small coded alphabet (default `{A,C,G,T}`),
//! this crate produces, at every requested hierarchy level, an ordered
//! sequence of *cores* identified by three local patterns (RINT, LMIN,
//! LMAX). Level `L+1` is built from level `L` by deterministic coin-tossing
//! compression followed by the same pattern scan over the compressed
//! sequence.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lcp-core   (Alphabet, Core, LcpConfig)   │
//! │  lcp-hash   (Interner, LabelMode)          │
//! │  lcp-parse  (Atom, scan, parse_bytes/…)    │
//! ├─────────────────────────────────────────┤
//! │  Lps  (level, cores, LabelSource)          │  this crate: C5
//! │  split_merge::build                        │  this crate: C6
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use lcp::{LabelSource, Lps};
//! use lcp_core::Alphabet;
//!
//! let alphabet = Alphabet::init_default(false);
//! let mut lps = Lps::from_bytes(b"GGGACCTGGTGACCCCAGCCCACG", &alphabet, LabelSource::Hash)?;
//! lps.deepen()?;
//! # Ok::<(), lcp::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod lps;
mod split_merge;

pub use error::{Error, Result};
pub use lps::{LabelSource, Lps};

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{Error, LabelSource, Lps, Result};
    pub use lcp_core::{Alphabet, Core, LcpConfig};
    pub use lcp_hash::{Interner, LabelMode};
}
