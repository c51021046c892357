//! Boundary scenario tests for the compress/decompress pipeline.

use driftflate_codec::{compress, decompress};

#[test]
fn test_empty_input() {
    let input = b"";
    let compressed = compress(input);
    assert_eq!(&compressed[..4], &0u32.to_be_bytes());
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_single_byte() {
    let input = b"a";
    let compressed = compress(input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_repeated_byte_run_compresses_small() {
    let input = vec![b'a'; 1000];
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
    assert!(compressed.len() < 200);
}

#[test]
fn test_short_repeating_pattern() {
    let input = b"abcabcabcabc";
    let compressed = compress(input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input.to_vec());
}

#[test]
fn test_all_byte_values_repeated() {
    let input: Vec<u8> = (0..10).flat_map(|_| 0u8..=255).collect();
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_long_text_shrinks_and_splits_blocks() {
    let input = "The quick brown fox jumps over the lazy dog. ".repeat(1000);
    let compressed = compress(input.as_bytes());
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input.as_bytes());
    assert!(compressed.len() < input.len());
}

#[test]
fn test_all_zeros() {
    let input = vec![0u8; 1000];
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
    assert!(compressed.len() < input.len() / 10);
}

#[test]
fn test_max_match_length_boundary() {
    // 258 is the largest length the alphabet represents.
    let pattern = vec![42u8; 258];
    let mut input = Vec::new();
    for _ in 0..10 {
        input.extend_from_slice(&pattern);
    }
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_max_window_distance() {
    // A match referencing a byte exactly at the 512-byte window edge.
    let mut input = vec![0u8; 512];
    let pattern = b"PATTERN";
    input[0..pattern.len()].copy_from_slice(pattern);
    input.extend_from_slice(pattern);
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_alternating_pattern() {
    let mut input = Vec::with_capacity(2000);
    for i in 0..1000 {
        input.push(if i % 2 == 0 { b'A' } else { b'B' });
    }
    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_large_input_roundtrip() {
    let mut input = Vec::with_capacity(1024 * 1024);
    let pattern = b"The quick brown fox jumps over the lazy dog. ";
    while input.len() < 1024 * 1024 {
        input.extend_from_slice(pattern);
    }
    input.truncate(1024 * 1024);

    let compressed = compress(&input);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
}

#[test]
fn test_decompress_on_garbage_does_not_panic() {
    let garbage = vec![0xFFu8; 64];
    // Whatever the outcome, it must be an Err, not a panic.
    let _ = std::panic::catch_unwind(|| decompress(&garbage)).expect("must not panic");
}

#[test]
fn test_decompress_rejects_reserved_header() {
    // bitCount = 2 bits, payload is the reserved "11" header.
    let mut data = 2u32.to_be_bytes().to_vec();
    data.push(0b1100_0000);
    assert!(decompress(&data).is_err());
}

#[test]
fn test_fixed_and_dynamic_both_roundtrip() {
    // Highly skewed distribution nudges the encoder toward dynamic codes.
    let mut skewed = vec![b'x'; 2000];
    skewed.extend_from_slice(b"the quick brown fox jumps over the lazy dog");
    let compressed = compress(&skewed);
    assert_eq!(decompress(&compressed).unwrap(), skewed);

    // Tiny input has no room to amortize a dynamic header, so fixed wins.
    let tiny = b"ab";
    let compressed = compress(tiny);
    assert_eq!(decompress(&compressed).unwrap(), tiny.to_vec());
}
