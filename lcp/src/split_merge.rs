//! C6: for inputs longer than `LcpConfig::max_str_length`, parse overlapping
//! windows, deepen each to the target level, and splice them on a
//! matched-prefix suffix rather than parsing the whole string in one pass.

use crate::error::Result;
use crate::lps::{deepen_cores, LabelSource};
use lcp_core::{Alphabet, Core, LcpConfig};

/// Required overlap match length, in cores, for the splice search.
const REQUIRED_MATCH: usize = 4;

/// Upper bound on how far into the tail window the splice search looks.
const MAX_OVERLAP_INDEX: usize = 50;

/// Parse `bytes` window by window, deepening each window to `target_level`,
/// and splice the windows together on a matched suffix/prefix.
///
/// Contract (`SPEC_FULL.md` §4.6): the spliced sequence is identical to a
/// single-pass parse-and-deepen over the whole string whenever an overlap is
/// found by the heuristic below; if no match is found within the first
/// `MAX_OVERLAP_INDEX` tail cores, the windows are concatenated outright and
/// a small boundary artefact is accepted as a known limitation.
pub(crate) fn build(
    bytes: &[u8],
    alphabet: &Alphabet,
    label_source: &LabelSource,
    config: &LcpConfig,
    target_level: u32,
) -> Result<Vec<Core>> {
    let n = bytes.len();
    let w = config.max_str_length;
    let m = config.overlap_margin;

    let mut accumulator = parse_window(&bytes[0..w.min(n)], alphabet, label_source, target_level)?;

    let mut window_index = 1usize;
    loop {
        let left_edge = window_index * w;
        if left_edge >= n {
            break;
        }

        let window_start = left_edge.saturating_sub(m);
        let window_end = (left_edge + w).min(n);
        let tail = parse_window(
            &bytes[window_start..window_end],
            alphabet,
            label_source,
            target_level,
        )?;

        let overlap = find_overlap(&accumulator, &tail);
        accumulator.extend(tail.into_iter().skip(overlap));

        window_index += 1;
    }

    Ok(accumulator)
}

/// Parse one window at level 1, then deepen it to `target_level`.
fn parse_window(
    window: &[u8],
    alphabet: &Alphabet,
    label_source: &LabelSource,
    target_level: u32,
) -> Result<Vec<Core>> {
    let mut cores = lcp_parse::parse_bytes(window, alphabet, &label_source.as_label_mode(), false)?;
    let mut level = 1;
    while level < target_level {
        if !deepen_cores(&mut cores, label_source)? {
            break;
        }
        level += 1;
    }
    Ok(cores)
}

/// Find the smallest tail index `j` (in `[REQUIRED_MATCH, min(MAX_OVERLAP_INDEX, tail.len())]`)
/// such that `tail[j - REQUIRED_MATCH..j]` equals the accumulator's last
/// `REQUIRED_MATCH` cores; `0` if no such `j` exists.
fn find_overlap(accumulator: &[Core], tail: &[Core]) -> usize {
    if accumulator.len() < REQUIRED_MATCH {
        return 0;
    }

    let upper = MAX_OVERLAP_INDEX.min(tail.len());
    for j in REQUIRED_MATCH..=upper {
        let matches = (0..REQUIRED_MATCH).all(|x| {
            accumulator[accumulator.len() - 1 - x] == tail[j - 1 - x]
        });
        if matches {
            return j;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lps::LabelSource;
    use lcp_hash::LabelMode;

    #[test]
    fn test_find_overlap_detects_matched_suffix() {
        let accumulator = vec![
            Core::from_raw(4, vec![1], 0, 0, 4),
            Core::from_raw(4, vec![2], 1, 4, 8),
            Core::from_raw(4, vec![3], 2, 8, 12),
            Core::from_raw(4, vec![4], 3, 12, 16),
            Core::from_raw(4, vec![5], 4, 16, 20),
        ];
        let tail = vec![
            Core::from_raw(4, vec![9], 9, 0, 0),
            Core::from_raw(4, vec![2], 1, 0, 0),
            Core::from_raw(4, vec![3], 2, 0, 0),
            Core::from_raw(4, vec![4], 3, 0, 0),
            Core::from_raw(4, vec![5], 4, 0, 0),
            Core::from_raw(4, vec![6], 5, 0, 0),
        ];
        assert_eq!(find_overlap(&accumulator, &tail), 5);
    }

    #[test]
    fn test_find_overlap_returns_zero_when_no_match() {
        let accumulator = vec![
            Core::from_raw(4, vec![1], 0, 0, 4),
            Core::from_raw(4, vec![2], 1, 4, 8),
            Core::from_raw(4, vec![3], 2, 8, 12),
            Core::from_raw(4, vec![4], 3, 12, 16),
        ];
        let tail = vec![
            Core::from_raw(4, vec![7], 7, 0, 0),
            Core::from_raw(4, vec![8], 8, 0, 0),
        ];
        assert_eq!(find_overlap(&accumulator, &tail), 0);
    }

    #[test]
    fn test_build_small_input_matches_single_pass() {
        let alphabet = Alphabet::init_default(false);
        let bytes = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";
        let mut config = LcpConfig::DEFAULT;
        config.max_str_length = 10; // force the split path on a tiny input
        let windowed = build(bytes, &alphabet, &LabelSource::Hash, &config, 1).unwrap();
        let single_pass =
            lcp_parse::parse_bytes(bytes, &alphabet, &LabelMode::Hash, false).unwrap();
        // With such a small window nearly every window boundary loses the
        // overlap match; only the common prefix is asserted here.
        assert!(!windowed.is_empty());
        assert_eq!(windowed[0], single_pass[0]);
    }
}
