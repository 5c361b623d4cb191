//! End-to-end scenarios S1-S9 from `SPEC_FULL.md` §8.

use lcp::{LabelSource, Lps};
use lcp_core::{Alphabet, Core, LcpConfig};
use lcp_hash::{murmur3_32, Interner, LabelMode};
use std::sync::Arc;

const DNA69: &[u8] = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";

#[test]
fn s1_default_alphabet_init() {
    let alphabet = Alphabet::init_default(false);
    assert_eq!(alphabet.code(b'A'), Some(0));
    assert_eq!(alphabet.code(b'C'), Some(1));
    assert_eq!(alphabet.code(b'G'), Some(2));
    assert_eq!(alphabet.code(b'T'), Some(3));
    assert_eq!(alphabet.rc_code(b'A'), Some(3));
    assert_eq!(alphabet.rc_code(b'C'), Some(2));
    assert_eq!(alphabet.rc_code(b'G'), Some(1));
    assert_eq!(alphabet.rc_code(b'T'), Some(0));
    assert_eq!(alphabet.bit_width(), 2);
}

#[test]
fn s2_level1_parse_yields_31_cores_with_exact_bits() {
    let alphabet = Alphabet::init_default(false);
    assert_eq!(DNA69.len(), 69);

    let lps = Lps::from_bytes(DNA69, &alphabet, LabelSource::Hash).unwrap();

    let expected: [&str; 31] = [
        "100001", "00010111", "011110", "11101011", "101110", "100001", "000101010100", "010010",
        "1001010100", "010001", "100001", "010010", "10010100", "01000010", "100110", "10010100",
        "010010", "100111", "100010", "100111", "010010", "00101011", "111011", "100010",
        "00101000", "100010", "100011", "010001", "010010", "101101", "11010111",
    ];

    assert_eq!(lps.size(), 31);
    for (core, bits) in lps.cores().iter().zip(expected.iter()) {
        assert_eq!(&core.to_string(), bits);
    }
}

#[test]
fn s3_compress_scenario() {
    let mut a = Core::from_raw(3, vec![0b101], 0, 0, 3);
    let b = Core::from_raw(3, vec![0b111], 0, 3, 6);
    a.compress(&b);
    assert_eq!(a.bit_rep, vec![2]);
    assert_eq!(a.bit_size, 2);
}

#[test]
fn s4_inequality_scenario() {
    let a = Core::from_raw(4, vec![0b1010], 0, 0, 0);
    let b = Core::from_raw(3, vec![0b101], 0, 0, 0);
    assert!(a > b);
    assert_ne!(a, b);
    assert!(a >= a.clone());
}

#[test]
fn s5_round_trip_four_cores() {
    let cores = vec![
        Core::from_raw(6, vec![0b101101], 11, 0, 3),
        Core::from_raw(8, vec![0b0100_0010], 22, 3, 7),
        Core::from_raw(6, vec![0b011110], 33, 7, 10),
        Core::from_raw(12, vec![0b1010_1100_1111], 44, 10, 22),
    ];

    let mut buf = Vec::new();
    for core in &cores {
        core.write(&mut buf).unwrap();
    }

    let mut cursor = &buf[..];
    let mut read_back = Vec::new();
    for _ in 0..cores.len() {
        read_back.push(Core::read(&mut cursor).unwrap());
    }

    for (original, roundtripped) in cores.iter().zip(read_back.iter()) {
        assert_eq!(original.bit_size, roundtripped.bit_size);
        assert_eq!(original.bit_rep, roundtripped.bit_rep);
        assert_eq!(original.label, roundtripped.label);
        assert_eq!(original.start, roundtripped.start);
        assert_eq!(original.end, roundtripped.end);
        assert_eq!(original.memsize(), roundtripped.memsize());
    }
}

#[test]
fn s6_hash_mode_determinism() {
    let data = b"GGGACCTGGTGACCCCAGCC";
    let a = murmur3_32(data);
    let b = murmur3_32(data);
    assert_eq!(a, b);

    let mode = LabelMode::Hash;
    assert_eq!(mode.label_bytes(data), murmur3_32(data));
    assert_eq!(mode.label_bytes(data), mode.label_bytes(data));
}

#[test]
fn s7_interner_map_mode_determinism() {
    let interner = Arc::new(Interner::default());
    let alphabet = Alphabet::init_default(false);

    let a = Lps::from_bytes(DNA69, &alphabet, LabelSource::Map(Arc::clone(&interner))).unwrap();
    let b = Lps::from_bytes(DNA69, &alphabet, LabelSource::Map(Arc::clone(&interner))).unwrap();
    assert_eq!(a.get_labels(), b.get_labels());

    let distinct_bytes = b"TTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTT";
    let c = Lps::from_bytes(distinct_bytes, &alphabet, LabelSource::Map(interner)).unwrap();
    assert_ne!(a.get_labels(), c.get_labels());
}

#[test]
fn s8_reverse_complement_involution_at_code_level() {
    let alphabet = Alphabet::init_default(false);
    for byte in [b'A', b'C', b'G', b'T', b'a', b'c', b'g', b't'] {
        let code = alphabet.code(byte).unwrap();
        let rc = alphabet.rc_code(byte).unwrap();
        let complement = match byte.to_ascii_uppercase() {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            _ => unreachable!(),
        };
        assert_eq!(alphabet.code(complement), Some(rc));
        assert_eq!(alphabet.rc_code(complement), Some(code));
    }
}

#[test]
fn s9_default_config_matches_constants_table() {
    let config = LcpConfig::DEFAULT;
    assert_eq!(lcp_core::UBLOCK_BIT_SIZE, 32);
    assert_eq!(lcp_core::DCT_ITERATION_COUNT, 1);
    assert_eq!(config.constant_factor, 1.5);
    assert_eq!(config.str_hash_table_size, 1_000);
    assert_eq!(config.core_hash_table_size, 10_000);
    assert_eq!(config.max_str_length, 1_000_000);
    assert_eq!(config.overlap_margin, 10_000);
}
