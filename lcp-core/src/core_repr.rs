//! C2: the bit-packed representation of one parsed core.

use crate::config::UBLOCK_BIT_SIZE;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::io::{Read, Write};

/// Anything that can contribute bits to a freshly packed [`Core`].
///
/// Bytes (level 1) and already-built cores (level > 1) both implement this;
/// it is the Rust stand-in for the `Size`/`Representation` template
/// parameters of the reference constructor.
pub trait PackElement {
    /// Number of bits this element contributes to the packed value.
    fn bits(&self) -> u32;
    /// This element's own representation: MSB-first, right-aligned,
    /// exactly `ceil(bits()/32)` blocks.
    fn blocks(&self) -> &[u32];
}

/// One parsed region: a bit-packed value, a 32-bit label, and an origin
/// interval in the original input.
#[derive(Debug, Clone)]
pub struct Core {
    /// Number of significant bits in the packed value. Always `>= 2` once
    /// emitted by the parser.
    pub bit_size: u32,
    /// Packed value, MSB-first within each block, right-aligned overall.
    pub bit_rep: Vec<u32>,
    /// Dense label assigned by the interning layer.
    pub label: u32,
    /// Start offset (inclusive) in the original input.
    pub start: u64,
    /// End offset (exclusive) in the original input.
    pub end: u64,
}

impl PackElement for Core {
    fn bits(&self) -> u32 {
        self.bit_size
    }

    fn blocks(&self) -> &[u32] {
        &self.bit_rep
    }
}

impl Core {
    /// Construct directly from an already-packed buffer.
    pub fn from_raw(bit_size: u32, bit_rep: Vec<u32>, label: u32, start: u64, end: u64) -> Self {
        Self {
            bit_size,
            bit_rep,
            label,
            start,
            end,
        }
    }

    /// Pack a slice of atoms into one core, right-aligned from the last
    /// element backward, exactly as the reference constructor does.
    ///
    /// `label` is supplied by the caller (the interning layer assigns it
    /// from the atoms' codes/labels; see `lcp-hash`), so this crate carries
    /// no hashing dependency.
    pub fn pack<T: PackElement>(items: &[T], start: u64, end: u64, label: u32) -> Result<Self> {
        let bit_size: u32 = items.iter().map(|item| item.bits()).sum();

        if bit_size == 0 {
            return Ok(Self {
                bit_size,
                bit_rep: Vec::new(),
                label,
                start,
                end,
            });
        }

        let block_number = ((bit_size + UBLOCK_BIT_SIZE - 1) / UBLOCK_BIT_SIZE) as usize;
        let mut bit_rep = vec![0u32; block_number];

        let mut shift: u32 = 0;
        let mut block_index: isize = block_number as isize - 1;

        for item in items.iter().rev() {
            let item_bits = item.bits();
            let o_bit_rep = item.blocks();
            let top = ((item_bits - 1) / UBLOCK_BIT_SIZE) as isize;
            let mut i = top;

            while i >= 0 {
                // Mirrors the reference exactly, including its treatment of
                // a final sub-block whose size is an exact multiple of 32
                // (see SPEC_FULL.md §9) — unreachable for the alphabet bit
                // widths and post-compress core sizes this engine produces.
                let curr_block_size = if i > 0 {
                    UBLOCK_BIT_SIZE
                } else {
                    item_bits % UBLOCK_BIT_SIZE
                };

                let word = o_bit_rep[i as usize];
                bit_rep[block_index as usize] |= word.wrapping_shl(shift);

                if shift + curr_block_size > UBLOCK_BIT_SIZE {
                    bit_rep[(block_index - 1) as usize] |= word.wrapping_shr(UBLOCK_BIT_SIZE - shift);
                }

                if shift + curr_block_size >= UBLOCK_BIT_SIZE {
                    block_index -= 1;
                }

                shift = (shift + curr_block_size) % UBLOCK_BIT_SIZE;
                i -= 1;
            }
        }

        Ok(Self {
            bit_size,
            bit_rep,
            label,
            start,
            end,
        })
    }

    /// The `i`-th bit counting from the most significant end of the value.
    pub fn get(&self, i: u32) -> u32 {
        let index = self.bit_size - 1 - i;
        let block_number = self.bit_rep.len() as u32;
        let block = block_number - index / UBLOCK_BIT_SIZE - 1;
        (self.bit_rep[block as usize] >> (index % UBLOCK_BIT_SIZE)) & 1
    }

    /// Deterministic coin-tossing compression against the left neighbor.
    ///
    /// Replaces this core's value with `(position_of_first_differing_bit <<
    /// 1) | that_bit's_value`, scanning from the LSB upward. The label is
    /// left untouched.
    pub fn compress(&mut self, other: &Core) {
        let min_bit_size = self.bit_size.min(other.bit_size);
        let mut index = min_bit_size;
        let mut t_block_idx = (self.bit_size - 1) / UBLOCK_BIT_SIZE;
        let mut o_block_idx = (other.bit_size - 1) / UBLOCK_BIT_SIZE;

        while index >= UBLOCK_BIT_SIZE
            && self.bit_rep[t_block_idx as usize] == other.bit_rep[o_block_idx as usize]
        {
            t_block_idx -= 1;
            o_block_idx -= 1;
            index -= UBLOCK_BIT_SIZE;
        }

        let mut t_val = self.bit_rep[t_block_idx as usize];
        let mut o_val = other.bit_rep[o_block_idx as usize];

        while index > 0 && (t_val % 2) == (o_val % 2) {
            t_val /= 2;
            o_val /= 2;
            index -= 1;
        }

        let new_value = 2 * (min_bit_size - index) + (t_val % 2);

        self.bit_rep = vec![new_value];
        self.bit_size = if new_value > 0 {
            32 - new_value.leading_zeros()
        } else {
            0
        };
        self.bit_size = self.bit_size.max(2);
    }

    /// Write `start`, `end`, `bit_size`, the packed blocks, then `label`,
    /// all little-endian.
    pub fn write(&self, out: &mut impl Write) -> Result<()> {
        out.write_all(&self.start.to_le_bytes())?;
        out.write_all(&self.end.to_le_bytes())?;
        out.write_all(&self.bit_size.to_le_bytes())?;
        for block in &self.bit_rep {
            out.write_all(&block.to_le_bytes())?;
        }
        out.write_all(&self.label.to_le_bytes())?;
        Ok(())
    }

    /// Inverse of [`Core::write`].
    pub fn read(inp: &mut impl Read) -> Result<Self> {
        let mut buf8 = [0u8; 8];
        inp.read_exact(&mut buf8)?;
        let start = u64::from_le_bytes(buf8);
        inp.read_exact(&mut buf8)?;
        let end = u64::from_le_bytes(buf8);

        let mut buf4 = [0u8; 4];
        inp.read_exact(&mut buf4)?;
        let bit_size = u32::from_le_bytes(buf4);

        if bit_size < 2 {
            return Err(Error::corrupted_core(format!(
                "bit_size {bit_size} is below the minimum of 2"
            )));
        }
        if start > end {
            return Err(Error::corrupted_core(format!(
                "start {start} is greater than end {end}"
            )));
        }

        let block_number = ((bit_size + UBLOCK_BIT_SIZE - 1) / UBLOCK_BIT_SIZE) as usize;
        let mut bit_rep = Vec::with_capacity(block_number);
        for _ in 0..block_number {
            inp.read_exact(&mut buf4)?;
            bit_rep.push(u32::from_le_bytes(buf4));
        }

        inp.read_exact(&mut buf4)?;
        let label = u32::from_le_bytes(buf4);

        Ok(Self {
            bit_size,
            bit_rep,
            label,
            start,
            end,
        })
    }

    /// Approximate memory footprint in bytes: the struct itself plus the
    /// heap-allocated block buffer.
    pub fn memsize(&self) -> usize {
        std::mem::size_of::<Self>() + self.bit_rep.len() * std::mem::size_of::<u32>()
    }
}

impl PartialEq for Core {
    fn eq(&self, other: &Self) -> bool {
        self.bit_size == other.bit_size && self.bit_rep == other.bit_rep
    }
}

impl Eq for Core {}

impl PartialOrd for Core {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Core {
    /// Total order on `(bit_size, bit_rep)`, `bit_size` primary.
    fn cmp(&self, other: &Self) -> Ordering {
        self.bit_size
            .cmp(&other.bit_size)
            .then_with(|| self.bit_rep.cmp(&other.bit_rep))
    }
}

impl fmt::Display for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.bit_size {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}
