//! The generic RINT/LMIN/LMAX/SSEQ pattern scan (C4), instantiated once
//! over raw bytes for level 1 and once over already-built cores for every
//! level above.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Atom  (ByteAtom | lcp_core::Core)          │  what the scan reads
//! ├───────────────────────────────────────────┤
//! │  scan()  (RINT / LMIN / LMAX / SSEQ)        │  the shared C4 algorithm
//! ├───────────────────────────────────────────┤
//! │  parse_bytes / parse_cores                  │  per-level entry points
//! └───────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod atom;
mod scan;

pub use atom::{Atom, ByteAtom};
pub use scan::scan;

use lcp_core::{Alphabet, Core, Result};
use lcp_hash::LabelMode;

/// Parse `bytes` at level 1: build one [`ByteAtom`] per input byte under
/// `alphabet` (its reverse-complement codes when `rev_comp` is set) and scan
/// them with `extension_size = 0`.
pub fn parse_bytes(
    bytes: &[u8],
    alphabet: &Alphabet,
    label_mode: &LabelMode<'_>,
    rev_comp: bool,
) -> Result<Vec<Core>> {
    let atoms: Vec<ByteAtom> = bytes
        .iter()
        .enumerate()
        .map(|(i, &b)| ByteAtom::new(b, i as u64, alphabet, rev_comp))
        .collect();

    scan::scan(&atoms, 0, |atoms, lo, hi| {
        let raw: Vec<u8> = atoms[lo..hi].iter().map(ByteAtom::raw_byte).collect();
        label_mode.label_bytes(&raw)
    })
}

/// Re-parse an already DCT-compressed core sequence: scan `cores` with the
/// given `extension_size` (the number of dead-weight prefix cores left by
/// DCT), keying new labels off a tuple of source labels.
///
/// The tuple key is fixed at exactly `extension_size + 4` labels, read
/// starting at the core's own (extension-inclusive) left bound `lo` —
/// matching the reference's `struct cores { uint32_t data[DCT_ITERATION_COUNT
/// + 4]; ... }` (`hash.h`), whose constructor `std::copy_n`s that many labels
/// starting at the same pointer regardless of how far the pattern itself
/// (RINT can run longer) extends to the right. Near the tail of `cores`,
/// fewer than `extension_size + 4` labels may be available, in which case the
/// key is shorter — the "(at most)" qualifier in `SPEC_FULL.md` §4.3.
pub fn parse_cores(
    cores: &[Core],
    extension_size: usize,
    label_mode: &LabelMode<'_>,
) -> Result<Vec<Core>> {
    scan::scan(cores, extension_size, |atoms, lo, _hi| {
        let key_end = (lo + extension_size + 4).min(atoms.len());
        let labels: Vec<u32> = atoms[lo..key_end].iter().map(|c| c.label).collect();
        label_mode.label_tuple(&labels)
    })
}

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{parse_bytes, parse_cores, Atom, ByteAtom};
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcp_hash::Interner;

    #[test]
    fn test_parse_bytes_s2_scenario_cores_count() {
        let alphabet = Alphabet::init_default(false);
        let s = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";
        let cores = parse_bytes(s, &alphabet, &LabelMode::Hash, false).unwrap();
        assert_eq!(cores.len(), 31);
    }

    #[test]
    fn test_parse_bytes_map_mode_dedups_repeated_cores() {
        let alphabet = Alphabet::init_default(false);
        let interner = Interner::default();
        let mode = LabelMode::Map(&interner);
        let s = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";
        let first = parse_bytes(s, &alphabet, &mode, false).unwrap();
        let second = parse_bytes(s, &alphabet, &mode, false).unwrap();
        assert_eq!(
            first.iter().map(|c| c.label).collect::<Vec<_>>(),
            second.iter().map(|c| c.label).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_parse_cores_reparses_with_extension() {
        let alphabet = Alphabet::init_default(false);
        let s = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";
        let mut level1 = parse_bytes(s, &alphabet, &LabelMode::Hash, false).unwrap();
        assert!(level1.len() > 2);

        // Fake one DCT pass (extension_size = 1): compress the tail against
        // its left neighbor, leaving the first core untouched.
        for i in (1..level1.len()).rev() {
            let (left, right) = level1.split_at_mut(i);
            right[0].compress(&left[i - 1]);
        }

        let level2 = parse_cores(&level1, 1, &LabelMode::Hash).unwrap();
        for core in &level2 {
            assert!(core.bit_size >= 2);
        }
    }
}
