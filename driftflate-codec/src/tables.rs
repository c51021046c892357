//! Static alphabet tables: length/distance code mappings and the fixed
//! Huffman code tables.
//!
//! The length and distance alphabets follow RFC 1951 §3.2.5's table
//! exactly (the wire format is private, but the alphabets it reuses are
//! not reinvented). The fixed code tables follow RFC 1951 §3.2.6.

use crate::huffman::{HuffmanCodes, HuffmanTree};
use driftflate_core::error::Result;
use std::sync::OnceLock;

/// Fixed literal/length code lengths.
///
/// - Symbols 0-143: 8 bits
/// - Symbols 144-255: 9 bits
/// - Symbols 256-279: 7 bits
/// - Symbols 280-287: 8 bits
pub fn fixed_litlen_lengths() -> [u8; 288] {
    let mut lengths = [0u8; 288];

    for len in lengths.iter_mut().take(144) {
        *len = 8;
    }
    for len in lengths.iter_mut().take(256).skip(144) {
        *len = 9;
    }
    for len in lengths.iter_mut().take(280).skip(256) {
        *len = 7;
    }
    for len in lengths.iter_mut().take(288).skip(280) {
        *len = 8;
    }

    lengths
}

/// Fixed distance code lengths: all 30 distance codes use 5 bits.
pub fn fixed_distance_lengths() -> [u8; 30] {
    [5u8; 30]
}

/// The fixed literal/length Huffman tree, cached after first construction.
pub fn fixed_litlen_tree() -> Result<&'static HuffmanTree> {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();

    Ok(TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_litlen_lengths())
            .expect("fixed litlen tree construction should never fail")
    }))
}

/// The fixed distance Huffman tree, cached after first construction.
pub fn fixed_distance_tree() -> Result<&'static HuffmanTree> {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();

    Ok(TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_distance_lengths())
            .expect("fixed distance tree construction should never fail")
    }))
}

/// The fixed literal/length code table, cached after first construction.
pub fn fixed_litlen_codes() -> Result<&'static HuffmanCodes> {
    static CODES: OnceLock<HuffmanCodes> = OnceLock::new();

    Ok(CODES.get_or_init(|| {
        HuffmanCodes::from_code_lengths(&fixed_litlen_lengths())
            .expect("fixed litlen code table construction should never fail")
    }))
}

/// The fixed distance code table, cached after first construction.
pub fn fixed_distance_codes() -> Result<&'static HuffmanCodes> {
    static CODES: OnceLock<HuffmanCodes> = OnceLock::new();

    Ok(CODES.get_or_init(|| {
        HuffmanCodes::from_code_lengths(&fixed_distance_lengths())
            .expect("fixed distance code table construction should never fail")
    }))
}

/// Length code base values for symbols 257-285.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, // 257-264: 0 extra bits
    11, 13, 15, 17, // 265-268: 1 extra bit
    19, 23, 27, 31, // 269-272: 2 extra bits
    35, 43, 51, 59, // 273-276: 3 extra bits
    67, 83, 99, 115, // 277-280: 4 extra bits
    131, 163, 195, 227, // 281-284: 5 extra bits
    258, // 285: 0 extra bits (special case)
];

/// Number of extra bits for length codes 257-285.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, // 257-264
    1, 1, 1, 1, // 265-268
    2, 2, 2, 2, // 269-272
    3, 3, 3, 3, // 273-276
    4, 4, 4, 4, // 277-280
    5, 5, 5, 5, // 281-284
    0, // 285
];

/// Distance code base values for codes 0-29.
pub const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, // 0-3: 0 extra bits
    5, 7, // 4-5: 1 extra bit
    9, 13, // 6-7: 2 extra bits
    17, 25, // 8-9: 3 extra bits
    33, 49, // 10-11: 4 extra bits
    65, 97, // 12-13: 5 extra bits
    129, 193, // 14-15: 6 extra bits
    257, 385, // 16-17: 7 extra bits
    513, 769, // 18-19: 8 extra bits
    1025, 1537, // 20-21: 9 extra bits
    2049, 3073, // 22-23: 10 extra bits
    4097, 6145, // 24-25: 11 extra bits
    8193, 12289, // 26-27: 12 extra bits
    16385, 24577, // 28-29: 13 extra bits
];

/// Number of extra bits for distance codes 0-29.
pub const DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, // 0-3
    1, 1, // 4-5
    2, 2, // 6-7
    3, 3, // 8-9
    4, 4, // 10-11
    5, 5, // 12-13
    6, 6, // 14-15
    7, 7, // 16-17
    8, 8, // 18-19
    9, 9, // 20-21
    10, 10, // 22-23
    11, 11, // 24-25
    12, 12, // 26-27
    13, 13, // 28-29
];

/// Convert a length value (3-258) to `(symbol, extra_bits, extra_value)`.
pub fn length_to_code(length: u16) -> driftflate_core::Result<(u16, u8, u16)> {
    if !(3..=258).contains(&length) {
        return Err(driftflate_core::Error::invalid_length(length as u32));
    }

    let length = length as usize;

    let code = match length {
        3..=10 => length - 3 + 257,
        11..=18 => (length - 11) / 2 + 265,
        19..=34 => (length - 19) / 4 + 269,
        35..=66 => (length - 35) / 8 + 273,
        67..=130 => (length - 67) / 16 + 277,
        131..=257 => (length - 131) / 32 + 281,
        258 => 285,
        _ => unreachable!(),
    };

    let base = LENGTH_BASE[code - 257] as usize;
    let extra_bits = LENGTH_EXTRA_BITS[code - 257];
    let extra_value = (length - base) as u16;

    Ok((code as u16, extra_bits, extra_value))
}

/// Convert a distance value (1-32768) to `(symbol, extra_bits, extra_value)`.
pub fn distance_to_code(distance: u32) -> driftflate_core::Result<(u16, u8, u16)> {
    if !(1..=32768).contains(&distance) {
        return Err(driftflate_core::Error::invalid_distance(distance));
    }

    let code = match distance {
        1 => 0,
        2 => 1,
        3 => 2,
        4 => 3,
        5..=6 => 4,
        7..=8 => 5,
        9..=12 => 6,
        13..=16 => 7,
        17..=24 => 8,
        25..=32 => 9,
        33..=48 => 10,
        49..=64 => 11,
        65..=96 => 12,
        97..=128 => 13,
        129..=192 => 14,
        193..=256 => 15,
        257..=384 => 16,
        385..=512 => 17,
        513..=768 => 18,
        769..=1024 => 19,
        1025..=1536 => 20,
        1537..=2048 => 21,
        2049..=3072 => 22,
        3073..=4096 => 23,
        4097..=6144 => 24,
        6145..=8192 => 25,
        8193..=12288 => 26,
        12289..=16384 => 27,
        16385..=24576 => 28,
        _ => 29, // 24577..=32768
    };

    let base = DISTANCE_BASE[code] as u32;
    let extra_bits = DISTANCE_EXTRA_BITS[code];
    let extra_value = (distance - base) as u16;

    Ok((code as u16, extra_bits, extra_value))
}

/// Decode a length from a length symbol (257-285) and its extra-bit value.
pub fn decode_length(symbol: u16, extra: u16) -> driftflate_core::Result<u16> {
    if !(257..=285).contains(&symbol) {
        return Err(driftflate_core::Error::invalid_symbol(symbol as u32, 286));
    }
    Ok(LENGTH_BASE[(symbol - 257) as usize] + extra)
}

/// Decode a distance from a distance symbol (0-29) and its extra-bit value.
pub fn decode_distance(symbol: u16, extra: u16) -> driftflate_core::Result<u32> {
    if symbol >= 30 {
        return Err(driftflate_core::Error::invalid_symbol(symbol as u32, 30));
    }
    Ok(DISTANCE_BASE[symbol as usize] as u32 + extra as u32)
}
