//! Tunable constants for the LCP engine.
//!
//! [`UBLOCK_BIT_SIZE`] and [`DCT_ITERATION_COUNT`] affect the on-disk core
//! format and the size of tuple interning keys, so they are fixed crate
//! constants rather than runtime configuration. Everything else tunable
//! (capacity hints, split/merge window sizes) lives on [`LcpConfig`].

/// Bit width of one block in a core's packed representation.
pub const UBLOCK_BIT_SIZE: u32 = 32;

/// Number of deterministic coin-tossing passes performed per `deepen()`.
pub const DCT_ITERATION_COUNT: usize = 1;

/// Runtime-tunable parameters of the LCP engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcpConfig {
    /// Capacity hint divisor: `input_len / constant_factor^level`.
    pub constant_factor: f64,
    /// Default reservation for the string interning map.
    pub str_hash_table_size: usize,
    /// Default reservation for the tuple interning map.
    pub core_hash_table_size: usize,
    /// Window size `W` for the split/merge driver.
    pub max_str_length: usize,
    /// Overlap margin `M` for the split/merge driver.
    pub overlap_margin: usize,
}

impl LcpConfig {
    /// Default configuration, matching the reference constants table.
    pub const DEFAULT: Self = Self {
        constant_factor: 1.5,
        str_hash_table_size: 1_000,
        core_hash_table_size: 10_000,
        max_str_length: 1_000_000,
        overlap_margin: 10_000,
    };
}

impl Default for LcpConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
