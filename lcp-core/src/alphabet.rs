//! C1: byte → small integer code mapping, with its reverse-complement twin.
//!
//! Modeled as an explicit, immutable, cloneable handle rather than process
//! global state (see `SPEC_FULL.md` §9): callers construct one `Alphabet`
//! and share it (by reference or `Arc`) across every parse that must agree
//! on the same coding.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;

const TABLE_SIZE: usize = 256;

/// Sentinel stored in the code tables for a byte with no assigned code.
const INVALID: i32 = -1;

/// A byte → code table and its reverse-complement twin.
///
/// `code(byte)` and `rc_code(byte)` both return `None` for bytes that were
/// never mapped (e.g. `N` in a default DNA alphabet); such bytes break local
/// patterns during parsing rather than participating in them.
#[derive(Debug, Clone)]
pub struct Alphabet {
    forward: [i32; TABLE_SIZE],
    reverse_complement: [i32; TABLE_SIZE],
    characters: [u8; TABLE_SIZE],
    bit_width: u32,
}

impl Alphabet {
    /// Default DNA alphabet: `A=0, C=1, G=2, T=3` (case-insensitive),
    /// reverse-complement `A<->T, C<->G`; bit width 2.
    pub fn init_default(verbose: bool) -> Self {
        let mut forward = [INVALID; TABLE_SIZE];
        let mut reverse_complement = [INVALID; TABLE_SIZE];
        let mut characters = [0u8; TABLE_SIZE];

        let pairs: [(u8, i32, i32); 4] = [
            (b'A', 0, 3),
            (b'C', 1, 2),
            (b'G', 2, 1),
            (b'T', 3, 0),
        ];

        for (ch, fwd, rc) in pairs {
            forward[ch as usize] = fwd;
            reverse_complement[ch as usize] = rc;
            characters[ch as usize] = ch;

            let lower = ch.to_ascii_lowercase();
            forward[lower as usize] = fwd;
            reverse_complement[lower as usize] = rc;
            characters[lower as usize] = ch;
        }

        let alphabet = Self {
            forward,
            reverse_complement,
            characters,
            bit_width: 2,
        };

        if verbose {
            eprintln!("{}", alphabet.summary());
        }

        alphabet
    }

    /// Build an alphabet from explicit forward/reverse-complement maps.
    ///
    /// Rejects any negative code. The bit width is derived from the largest
    /// code present in either map.
    pub fn init_from_map(
        fwd: &HashMap<char, i32>,
        rc: &HashMap<char, i32>,
        verbose: bool,
    ) -> Result<Self> {
        let mut forward = [INVALID; TABLE_SIZE];
        let mut reverse_complement = [INVALID; TABLE_SIZE];
        let mut characters = [0u8; TABLE_SIZE];
        let mut max_code = 0i32;

        for (&ch, &code) in fwd {
            if code < 0 {
                return Err(Error::invalid_alphabet_argument(format!(
                    "negative forward code {code} for '{ch}'"
                )));
            }
            if !ch.is_ascii() {
                return Err(Error::invalid_alphabet_argument(format!(
                    "non-ASCII character '{ch}' in forward map"
                )));
            }
            forward[ch as usize] = code;
            characters[ch as usize] = ch as u8;
            max_code = max_code.max(code);
        }

        for (&ch, &code) in rc {
            if code < 0 {
                return Err(Error::invalid_alphabet_argument(format!(
                    "negative reverse-complement code {code} for '{ch}'"
                )));
            }
            if !ch.is_ascii() {
                return Err(Error::invalid_alphabet_argument(format!(
                    "non-ASCII character '{ch}' in reverse-complement map"
                )));
            }
            reverse_complement[ch as usize] = code;
            max_code = max_code.max(code);
        }

        let bit_width = bit_width_for_max_code(max_code);

        let alphabet = Self {
            forward,
            reverse_complement,
            characters,
            bit_width,
        };

        if verbose {
            eprintln!("{}", alphabet.summary());
        }

        Ok(alphabet)
    }

    /// Build an alphabet from a file of `<char> <fwd> <rc>` lines.
    pub fn init_from_file(path: impl AsRef<std::path::Path>, verbose: bool) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        let mut fwd = HashMap::new();
        let mut rc = HashMap::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let ch = fields
                .next()
                .and_then(|s| s.chars().next())
                .ok_or_else(|| {
                    Error::malformed_alphabet_file(line_no + 1, "missing character field")
                })?;
            let fwd_code: i32 = fields
                .next()
                .ok_or_else(|| {
                    Error::malformed_alphabet_file(line_no + 1, "missing forward code field")
                })?
                .parse()
                .map_err(|_| {
                    Error::malformed_alphabet_file(line_no + 1, "forward code is not an integer")
                })?;
            let rc_code: i32 = fields
                .next()
                .ok_or_else(|| {
                    Error::malformed_alphabet_file(
                        line_no + 1,
                        "missing reverse-complement code field",
                    )
                })?
                .parse()
                .map_err(|_| {
                    Error::malformed_alphabet_file(
                        line_no + 1,
                        "reverse-complement code is not an integer",
                    )
                })?;

            fwd.insert(ch, fwd_code);
            rc.insert(ch, rc_code);
        }

        Self::init_from_map(&fwd, &rc, verbose)
    }

    /// Forward code for `byte`, or `None` if the byte is not mapped.
    #[inline]
    pub fn code(&self, byte: u8) -> Option<u32> {
        let v = self.forward[byte as usize];
        if v < 0 { None } else { Some(v as u32) }
    }

    /// Reverse-complement code for `byte`, or `None` if unmapped.
    #[inline]
    pub fn rc_code(&self, byte: u8) -> Option<u32> {
        let v = self.reverse_complement[byte as usize];
        if v < 0 { None } else { Some(v as u32) }
    }

    /// Bit width `w` of one symbol under this alphabet.
    #[inline]
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Human-readable dump of the active coefficients and bit width.
    ///
    /// Returned rather than printed (see `SPEC_FULL.md` §1.1) so the caller
    /// can route it through whichever logger they use.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for byte in 0..TABLE_SIZE {
            if self.forward[byte] >= 0 {
                let ch = self.characters[byte] as char;
                let _ = writeln!(
                    out,
                    "{ch} -> fwd={} rc={}",
                    self.forward[byte], self.reverse_complement[byte]
                );
            }
        }
        let _ = write!(out, "bit_width = {}", self.bit_width);
        out
    }
}

fn bit_width_for_max_code(max_code: i32) -> u32 {
    if max_code <= 0 {
        return 1;
    }
    let mut bits = 1u32;
    while (1i64 << bits) <= max_code as i64 {
        bits += 1;
    }
    bits
}
