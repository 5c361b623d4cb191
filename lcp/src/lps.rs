//! C5: the hierarchy engine. Owns one level's core vector, runs DCT +
//! re-parse to advance a level, and (de)serializes the whole container.

use crate::error::{Error, Result};
use crate::split_merge;
use lcp_core::{Alphabet, Core, LcpConfig};
use lcp_hash::{Interner, LabelMode};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

/// Which label-assignment scheme an [`Lps`] uses for every core it emits.
///
/// Owns an `Arc<Interner>` rather than borrowing one, so an `Lps` built in
/// map mode can outlive the call that constructed it without carrying a
/// lifetime parameter.
#[derive(Debug, Clone)]
pub enum LabelSource {
    /// Stateless MurmurHash3-32, fixed seed 42.
    Hash,
    /// Shared, deduplicated dense-id assignment.
    Map(Arc<Interner>),
}

impl LabelSource {
    /// Borrow this source as the [`LabelMode`] the parser expects.
    pub fn as_label_mode(&self) -> LabelMode<'_> {
        match self {
            LabelSource::Hash => LabelMode::Hash,
            LabelSource::Map(interner) => LabelMode::Map(interner),
        }
    }
}

/// One level of the LCP hierarchy: the `level` tag plus its ordered core
/// sequence.
///
/// An `Lps` is single-writer: callers must serialize their own calls to
/// `deepen` and the constructors on one instance. Distinct `Lps` instances,
/// even ones sharing a `LabelSource::Map` interner, may be driven from
/// different threads concurrently (see `SPEC_FULL.md` §5).
#[derive(Debug)]
pub struct Lps {
    level: u32,
    cores: Vec<Core>,
    label_source: LabelSource,
}

impl Lps {
    /// Parse `bytes` at level 1 under `alphabet`, windowing through
    /// [`split_merge`] when `bytes` is longer than
    /// `LcpConfig::DEFAULT.max_str_length`.
    pub fn from_bytes(bytes: &[u8], alphabet: &Alphabet, label_source: LabelSource) -> Result<Self> {
        Self::from_bytes_with_config(bytes, alphabet, label_source, &LcpConfig::DEFAULT)
    }

    /// As [`Lps::from_bytes`], but with an explicit [`LcpConfig`] controlling
    /// the split/merge window and overlap margin.
    pub fn from_bytes_with_config(
        bytes: &[u8],
        alphabet: &Alphabet,
        label_source: LabelSource,
        config: &LcpConfig,
    ) -> Result<Self> {
        let cores = if bytes.len() > config.max_str_length {
            split_merge::build(bytes, alphabet, &label_source, config, 1)?
        } else {
            lcp_parse::parse_bytes(bytes, alphabet, &label_source.as_label_mode(), false)?
        };
        Ok(Self {
            level: 1,
            cores,
            label_source,
        })
    }

    /// Parse the reverse complement of `bytes`: physically reverse the input
    /// and code it with `alphabet`'s reverse-complement table instead of the
    /// forward one.
    ///
    /// Offsets in the resulting cores are relative to the reverse-complement
    /// strand's own coordinate frame (position 0 is the last base of the
    /// forward input), not back-mapped onto forward-strand coordinates — see
    /// `DESIGN.md`.
    pub fn from_bytes_rev_comp(
        bytes: &[u8],
        alphabet: &Alphabet,
        label_source: LabelSource,
    ) -> Result<Self> {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        let cores = lcp_parse::parse_bytes(&reversed, alphabet, &label_source.as_label_mode(), true)?;
        Ok(Self {
            level: 1,
            cores,
            label_source,
        })
    }

    /// Read an `Lps` previously written by [`Lps::write`].
    pub fn read(inp: &mut impl Read, label_source: LabelSource) -> Result<Self> {
        let mut buf4 = [0u8; 4];
        inp.read_exact(&mut buf4)?;
        let level = i32::from_le_bytes(buf4);
        if level < 1 {
            return Err(Error::corrupted_file(format!(
                "level {level} is below the minimum of 1"
            )));
        }

        let mut buf8 = [0u8; 8];
        inp.read_exact(&mut buf8)?;
        let size = u64::from_le_bytes(buf8);

        let mut cores = Vec::with_capacity(size.min(1 << 20) as usize);
        for _ in 0..size {
            cores.push(Core::read(inp)?);
        }

        Ok(Self {
            level: level as u32,
            cores,
            label_source,
        })
    }

    /// Read an `Lps` from a file at `path`.
    pub fn from_file(path: impl AsRef<Path>, label_source: LabelSource) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        Self::read(&mut file, label_source)
    }

    /// Write `level`, the core count, then every core in order, little-endian.
    pub fn write(&self, out: &mut impl Write) -> Result<()> {
        out.write_all(&(self.level as i32).to_le_bytes())?;
        out.write_all(&(self.cores.len() as u64).to_le_bytes())?;
        for core in &self.cores {
            core.write(out)?;
        }
        Ok(())
    }

    /// Advance by one level: DCT-compress, then re-parse.
    ///
    /// Returns `false` (and empties `cores`) when fewer than
    /// `DCT_ITERATION_COUNT + 2` cores remain — the terminal state. `level`
    /// is incremented in either case.
    pub fn deepen(&mut self) -> Result<bool> {
        let progressed = deepen_cores(&mut self.cores, &self.label_source)?;
        self.level += 1;
        Ok(progressed)
    }

    /// Call [`Lps::deepen`] until `level >= target_level` or a terminal
    /// state is reached. Returns whether any progress was made.
    pub fn deepen_to(&mut self, target_level: u32) -> Result<bool> {
        let mut progressed = false;
        while self.level < target_level {
            if self.deepen()? {
                progressed = true;
            } else {
                break;
            }
        }
        Ok(progressed)
    }

    /// The 1-based hierarchy level this container currently represents.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// This level's ordered core sequence.
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Number of cores at this level.
    pub fn size(&self) -> usize {
        self.cores.len()
    }

    /// `true` once `deepen` has collapsed this container to the empty,
    /// terminal state.
    pub fn is_terminal(&self) -> bool {
        self.cores.is_empty() && self.level > 1
    }

    /// A flat copy of every core's label, in order.
    pub fn get_labels(&self) -> Vec<u32> {
        self.cores.iter().map(|c| c.label).collect()
    }

    /// Approximate memory footprint: the container plus every core's own
    /// `memsize`.
    pub fn memsize(&self) -> usize {
        std::mem::size_of::<Self>() + self.cores.iter().map(Core::memsize).sum::<usize>()
    }
}

impl PartialEq for Lps {
    /// Same core count, cores pairwise equal by the `Core` order (§4.2).
    fn eq(&self, other: &Self) -> bool {
        self.cores.len() == other.cores.len()
            && self.cores.iter().zip(other.cores.iter()).all(|(a, b)| a == b)
    }
}

/// One DCT pass (`DCT_ITERATION_COUNT` iterations) followed by a re-parse.
/// Shared between [`Lps::deepen`] and the per-window deepening
/// [`split_merge::build`] performs before splicing windows together.
pub(crate) fn deepen_cores(cores: &mut Vec<Core>, label_source: &LabelSource) -> Result<bool> {
    let d = lcp_core::DCT_ITERATION_COUNT;

    if cores.len() < d + 2 {
        cores.clear();
        return Ok(false);
    }

    for pass in 0..d {
        let size = cores.len();
        for i in (pass + 1..size).rev() {
            let (left, right) = cores.split_at_mut(i);
            right[0].compress(&left[i - 1]);
        }
    }

    let label_mode = label_source.as_label_mode();
    let next = lcp_parse::parse_cores(cores, d, &label_mode)?;
    *cores = next;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DNA69: &[u8] =
        b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";

    #[test]
    fn test_from_bytes_s2_scenario() {
        let alphabet = Alphabet::init_default(false);
        let lps = Lps::from_bytes(DNA69, &alphabet, LabelSource::Hash).unwrap();
        assert_eq!(lps.level(), 1);
        assert_eq!(lps.size(), 31);
    }

    #[test]
    fn test_deepen_advances_level_and_shrinks() {
        let alphabet = Alphabet::init_default(false);
        let mut lps = Lps::from_bytes(DNA69, &alphabet, LabelSource::Hash).unwrap();
        let size1 = lps.size();
        let progressed = lps.deepen().unwrap();
        assert!(progressed);
        assert_eq!(lps.level(), 2);
        assert!(lps.size() <= size1);
    }

    #[test]
    fn test_deepen_terminal_state_clears_cores() {
        let alphabet = Alphabet::init_default(false);
        // Three bytes parse to at most a couple of level-1 cores -- too few
        // to survive a DCT pass requiring DCT_ITERATION_COUNT + 2.
        let mut lps = Lps::from_bytes(b"AC", &alphabet, LabelSource::Hash).unwrap();
        assert_eq!(lps.size(), 0);
        let progressed = lps.deepen().unwrap();
        assert!(!progressed);
        assert_eq!(lps.level(), 2);
        assert!(lps.cores().is_empty());
        assert!(lps.is_terminal());
    }

    #[test]
    fn test_write_read_round_trip_s5_scenario() {
        let cores = vec![
            Core::from_raw(6, vec![0b101101], 1, 0, 3),
            Core::from_raw(8, vec![0b01000010], 2, 3, 7),
            Core::from_raw(6, vec![0b011110], 3, 7, 10),
            Core::from_raw(12, vec![0b1010_1100_1111], 4, 10, 22),
        ];
        let lps = Lps {
            level: 1,
            cores,
            label_source: LabelSource::Hash,
        };

        let mut buf = Vec::new();
        lps.write(&mut buf).unwrap();
        let read_back = Lps::read(&mut &buf[..], LabelSource::Hash).unwrap();

        assert_eq!(lps.level(), read_back.level());
        assert_eq!(lps, read_back);
        assert_eq!(lps.memsize(), read_back.memsize());
    }

    #[test]
    fn test_get_labels_matches_core_order() {
        let alphabet = Alphabet::init_default(false);
        let lps = Lps::from_bytes(DNA69, &alphabet, LabelSource::Hash).unwrap();
        let labels = lps.get_labels();
        assert_eq!(labels.len(), lps.size());
        assert_eq!(labels, lps.cores().iter().map(|c| c.label).collect::<Vec<_>>());
    }

    #[test]
    fn test_map_mode_shares_labels_across_instances() {
        let alphabet = Alphabet::init_default(false);
        let interner = Arc::new(Interner::default());
        let a = Lps::from_bytes(DNA69, &alphabet, LabelSource::Map(Arc::clone(&interner))).unwrap();
        let b = Lps::from_bytes(DNA69, &alphabet, LabelSource::Map(interner)).unwrap();
        assert_eq!(a.get_labels(), b.get_labels());
    }

    #[test]
    fn test_rev_comp_matches_forward_parse_of_complemented_reverse() {
        let alphabet = Alphabet::init_default(false);
        fn complement(byte: u8) -> u8 {
            match byte {
                b'A' => b'T',
                b'C' => b'G',
                b'G' => b'C',
                b'T' => b'A',
                other => other,
            }
        }
        // The textbook reverse complement: reverse the sequence, then
        // complement each base, then code forward. `from_bytes_rev_comp`
        // instead reverses and looks up rc codes directly -- the two must
        // agree, which is the involution property (S8) this crate actually
        // exercises.
        let textbook_rev_comp: Vec<u8> = DNA69.iter().rev().map(|&b| complement(b)).collect();
        let expected = Lps::from_bytes(&textbook_rev_comp, &alphabet, LabelSource::Hash).unwrap();
        let actual = Lps::from_bytes_rev_comp(DNA69, &alphabet, LabelSource::Hash).unwrap();
        assert_eq!(expected, actual);
    }
}
