//! C4: the generic RINT/LMIN/LMAX/SSEQ pattern scan, shared between level-1
//! (byte) and level > 1 (core) parsing.

use crate::atom::Atom;
use lcp_core::{Core, Result};

/// Scan `atoms[extension_size..]` for RINT, LMIN, and LMAX patterns,
/// emitting an SSEQ core to cover any gap left by atoms that matched none of
/// the three, and return the next level's core sequence.
///
/// `extension_size` prefix atoms are never themselves the start of a new
/// core (they exist only to be read as a left neighbor by the first real
/// pattern) but, matching the reference `parse()` (`lps.h`'s
/// `cores->emplace_back(it1 - extension_size, it2, ...)`), they ARE folded
/// into every emitted core: a core whose pattern origin is `it1` is packed
/// and labeled over `[it1 - extension_size, core_end)`, not `[it1,
/// core_end)`. `label_of` receives the full atom slice plus the `(lo, hi)`
/// bounds of that window and returns the label to assign the core; callers
/// supply string-key or tuple-key interning accordingly (tuple keys are
/// further clamped to a fixed width — see `lcp-parse::parse_cores`).
pub fn scan<A, F>(atoms: &[A], extension_size: usize, mut label_of: F) -> Result<Vec<Core>>
where
    A: Atom,
    F: FnMut(&[A], usize, usize) -> u32,
{
    let n = atoms.len();
    let mut cores = Vec::new();
    if n == 0 {
        return Ok(cores);
    }

    let mut it1 = extension_size;
    // Sentinel meaning "no core has been emitted yet" — never satisfies the
    // `prev_end < it1` gap test below for the first candidate position.
    let mut prev_end = n;

    while it1 + 2 < n {
        if !atoms[it1].atom_eq(&atoms[it1 + 1]) {
            let m = count_middle(atoms, it1);

            if m >= 2 {
                let core_end = it1 + 2 + m;
                emit_gap_filler(atoms, prev_end, it1, extension_size, &mut cores, &mut label_of)?;
                emit_core(atoms, it1 - extension_size, core_end, &mut cores, &mut label_of)?;
                prev_end = core_end;
            } else if is_lmin(atoms, it1) {
                let core_end = it1 + 3;
                emit_gap_filler(atoms, prev_end, it1, extension_size, &mut cores, &mut label_of)?;
                emit_core(atoms, it1 - extension_size, core_end, &mut cores, &mut label_of)?;
                prev_end = core_end;
            } else if it1 > extension_size && is_lmax(atoms, it1, n) {
                let core_end = it1 + 3;
                emit_gap_filler(atoms, prev_end, it1, extension_size, &mut cores, &mut label_of)?;
                emit_core(atoms, it1 - extension_size, core_end, &mut cores, &mut label_of)?;
                prev_end = core_end;
            }
        }

        it1 += 1;
    }

    Ok(cores)
}

/// Largest `m >= 1` such that `atoms[it+1..=it+m]` are pairwise adjacent-equal
/// (a run started by `atoms[it+1]`) and are followed by a distinct atom
/// within bounds; `0` if the run reaches the end of `atoms` unterminated.
fn count_middle<A: Atom>(atoms: &[A], it: usize) -> usize {
    let n = atoms.len();
    if it + 2 >= n {
        return 0;
    }
    let mut m = 1usize;
    while it + 1 + m < n && atoms[it + m].atom_eq(&atoms[it + 1 + m]) {
        m += 1;
    }
    if it + 1 + m < n {
        m
    } else {
        0
    }
}

fn is_lmin<A: Atom>(atoms: &[A], it: usize) -> bool {
    atoms[it].atom_gt(&atoms[it + 1]) && atoms[it + 1].atom_lt(&atoms[it + 2])
}

fn is_lmax<A: Atom>(atoms: &[A], it: usize, n: usize) -> bool {
    it + 3 < n
        && atoms[it].atom_lt(&atoms[it + 1])
        && atoms[it + 1].atom_gt(&atoms[it + 2])
        && !atoms[it - 1].atom_gt(&atoms[it])
        && !atoms[it + 2].atom_lt(&atoms[it + 3])
}

/// Mirrors the reference's `cores->emplace_back(it2 - 1 - extension_size,
/// it1 + 1, ...)` gap-filler call (`lps.h`): the SSEQ core's left bound is
/// also shifted left by `extension_size`, exactly like a pattern core's.
fn emit_gap_filler<A, F>(
    atoms: &[A],
    prev_end: usize,
    it1: usize,
    extension_size: usize,
    cores: &mut Vec<Core>,
    label_of: &mut F,
) -> Result<()>
where
    A: Atom,
    F: FnMut(&[A], usize, usize) -> u32,
{
    if prev_end < it1 {
        emit_core(atoms, prev_end - 1 - extension_size, it1 + 1, cores, label_of)?;
    }
    Ok(())
}

fn emit_core<A, F>(
    atoms: &[A],
    lo: usize,
    hi: usize,
    cores: &mut Vec<Core>,
    label_of: &mut F,
) -> Result<()>
where
    A: Atom,
    F: FnMut(&[A], usize, usize) -> u32,
{
    let slice = &atoms[lo..hi];
    let label = label_of(atoms, lo, hi);
    let start = atoms[lo].start();
    let end = atoms[hi - 1].end();
    cores.push(Core::pack(slice, start, end, label)?);
    Ok(())
}
