//! DEFLATE-style framing: per-block fixed-vs-dynamic code selection,
//! serialization, and the inverse decoder.
//!
//! This ties together [`crate::lz77`] (token production), [`crate::block_splitter`]
//! (block boundaries), [`crate::huffman`] (code construction) and [`crate::tables`]
//! (alphabets) into the two top-level total functions the rest of the crate
//! re-exports: [`compress`] and [`decompress`].

use crate::block_splitter::BlockSplitter;
use crate::huffman::{HuffmanBuilder, HuffmanCodes, HuffmanTree, END_OF_BLOCK};
use crate::lz77::{Lz77Matcher, Token};
use crate::tables;
use driftflate_core::bitstream::{BitSink, BitSource};
use driftflate_core::error::{Error, Result};
use driftflate_core::integer::IntegerCodec;

const LITLEN_ALPHABET_SIZE: usize = 286;
const DISTANCE_ALPHABET_SIZE: usize = 30;

const FIXED_BLOCK_HEADER: u32 = 0b01;
const DYNAMIC_BLOCK_HEADER: u32 = 0b10;

/// One entry in a block's serialization plan: a literal, a fused
/// match(+optional literal), or the end-of-block sentinel.
enum PlanItem {
    Literal(u8),
    Match {
        length_symbol: u16,
        length_extra_bits: u8,
        length_extra_value: u16,
        distance_symbol: u16,
        distance_extra_bits: u8,
        distance_extra_value: u16,
        trailing_literal: Option<u8>,
    },
    EndOfBlock,
}

fn build_plan(tokens: &[Token]) -> Result<Vec<PlanItem>> {
    let mut plan = Vec::with_capacity(tokens.len() + 1);

    for token in tokens {
        if token.is_match() {
            let (length_symbol, length_extra_bits, length_extra_value) =
                tables::length_to_code(token.length as u16)?;
            let (distance_symbol, distance_extra_bits, distance_extra_value) =
                tables::distance_to_code(token.distance)?;
            plan.push(PlanItem::Match {
                length_symbol,
                length_extra_bits,
                length_extra_value,
                distance_symbol,
                distance_extra_bits,
                distance_extra_value,
                trailing_literal: token.literal,
            });
        } else {
            plan.push(PlanItem::Literal(token.literal.expect(
                "a pure literal token always carries its literal byte",
            )));
        }
    }
    plan.push(PlanItem::EndOfBlock);

    Ok(plan)
}

/// Bit cost of [`IntegerCodec::encode`] for `n`: for `n == 0`, a single
/// separator bit; otherwise `bits(n) - 1` unary bits, one separator bit, and
/// `bits(n) - 1` payload bits.
fn integer_bit_length(n: u32) -> u64 {
    if n == 0 {
        return 1;
    }
    let bits = 32 - n.leading_zeros();
    2 * (bits as u64 - 1) + 1
}

fn estimate_fixed_bits(plan: &[PlanItem]) -> u64 {
    let litlen_lengths = tables::fixed_litlen_lengths();
    let dist_lengths = tables::fixed_distance_lengths();
    let mut bits = 0u64;

    for item in plan {
        match item {
            PlanItem::Literal(b) => bits += litlen_lengths[*b as usize] as u64,
            PlanItem::Match {
                length_symbol,
                length_extra_bits,
                distance_symbol,
                distance_extra_bits,
                trailing_literal,
                ..
            } => {
                bits += litlen_lengths[*length_symbol as usize] as u64;
                bits += *length_extra_bits as u64;
                bits += dist_lengths[*distance_symbol as usize] as u64;
                bits += *distance_extra_bits as u64;
                if let Some(literal) = trailing_literal {
                    bits += litlen_lengths[*literal as usize] as u64;
                }
            }
            PlanItem::EndOfBlock => bits += litlen_lengths[END_OF_BLOCK as usize] as u64,
        }
    }

    bits
}

fn estimate_dynamic_bits(
    plan: &[PlanItem],
    litlen_lengths: &[u8],
    dist_lengths: &[u8],
) -> u64 {
    let mut bits: u64 = litlen_lengths
        .iter()
        .chain(dist_lengths.iter())
        .map(|&l| integer_bit_length(l as u32))
        .sum();

    for item in plan {
        match item {
            PlanItem::Literal(b) => bits += litlen_lengths[*b as usize] as u64,
            PlanItem::Match {
                length_symbol,
                length_extra_bits,
                distance_symbol,
                distance_extra_bits,
                trailing_literal,
                ..
            } => {
                bits += litlen_lengths[*length_symbol as usize] as u64;
                bits += *length_extra_bits as u64;
                bits += dist_lengths[*distance_symbol as usize] as u64;
                bits += *distance_extra_bits as u64;
                if let Some(literal) = trailing_literal {
                    bits += litlen_lengths[*literal as usize] as u64;
                }
            }
            PlanItem::EndOfBlock => bits += litlen_lengths[END_OF_BLOCK as usize] as u64,
        }
    }

    bits
}

fn build_dynamic_lengths(plan: &[PlanItem]) -> (Vec<u8>, Vec<u8>) {
    let mut litlen_builder = HuffmanBuilder::new(LITLEN_ALPHABET_SIZE);
    let mut dist_builder = HuffmanBuilder::new(DISTANCE_ALPHABET_SIZE);

    for item in plan {
        match item {
            PlanItem::Literal(b) => litlen_builder.add(*b as u16),
            PlanItem::Match {
                length_symbol,
                distance_symbol,
                ..
            } => {
                litlen_builder.add(*length_symbol);
                dist_builder.add(*distance_symbol);
            }
            PlanItem::EndOfBlock => litlen_builder.add(END_OF_BLOCK),
        }
    }

    (litlen_builder.build_lengths(), dist_builder.build_lengths())
}

fn write_plan(
    sink: &mut BitSink,
    plan: &[PlanItem],
    litlen_codes: &HuffmanCodes,
    dist_codes: &HuffmanCodes,
) -> Result<()> {
    for item in plan {
        match item {
            PlanItem::Literal(b) => litlen_codes.encode(sink, *b as u16)?,
            PlanItem::Match {
                length_symbol,
                length_extra_bits,
                length_extra_value,
                distance_symbol,
                distance_extra_bits,
                distance_extra_value,
                trailing_literal,
            } => {
                litlen_codes.encode(sink, *length_symbol)?;
                sink.push_bits(*length_extra_value as u32, *length_extra_bits);
                dist_codes.encode(sink, *distance_symbol)?;
                sink.push_bits(*distance_extra_value as u32, *distance_extra_bits);
                if let Some(literal) = trailing_literal {
                    litlen_codes.encode(sink, *literal as u16)?;
                }
            }
            PlanItem::EndOfBlock => litlen_codes.encode(sink, END_OF_BLOCK)?,
        }
    }
    Ok(())
}

/// Serializes a single block's tokens, choosing fixed vs. dynamic codes by
/// whichever produces the shorter bit string (ties go to fixed).
fn write_block(sink: &mut BitSink, tokens: &[Token]) -> Result<()> {
    let plan = build_plan(tokens)?;

    let (litlen_lengths, dist_lengths) = build_dynamic_lengths(&plan);
    let fixed_bits = estimate_fixed_bits(&plan);
    let dynamic_bits = estimate_dynamic_bits(&plan, &litlen_lengths, &dist_lengths);

    if fixed_bits <= dynamic_bits {
        sink.push_bits(FIXED_BLOCK_HEADER, 2);
        let litlen_codes = tables::fixed_litlen_codes()?;
        let dist_codes = tables::fixed_distance_codes()?;
        write_plan(sink, &plan, litlen_codes, dist_codes)?;
    } else {
        sink.push_bits(DYNAMIC_BLOCK_HEADER, 2);
        for &len in litlen_lengths.iter().chain(dist_lengths.iter()) {
            IntegerCodec::encode(sink, len as u32);
        }
        let litlen_codes = HuffmanCodes::from_code_lengths(&litlen_lengths)?;
        let dist_codes = HuffmanCodes::from_code_lengths(&dist_lengths)?;
        write_plan(sink, &plan, &litlen_codes, &dist_codes)?;
    }

    Ok(())
}

/// Compress `data` into driftflate's private wire format. Total over every
/// input, including empty buffers.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let tokens = Lz77Matcher::encode(data);
    let mut sink = BitSink::new();

    if tokens.is_empty() {
        return sink.finish();
    }

    let mut splitter = BlockSplitter::new();
    let mut block_tokens: Vec<Token> = Vec::new();

    for token in tokens {
        if token.is_match() {
            splitter.observe_match(token.length);
        } else {
            splitter.observe_literal(token.literal.expect("pure literal token"));
        }
        block_tokens.push(token);

        if splitter.should_end_block(block_tokens.len() as u64) {
            write_block(&mut sink, &block_tokens).expect("encoding a freshly-built plan never fails");
            block_tokens.clear();
            splitter.reset();
        }
    }

    if !block_tokens.is_empty() {
        write_block(&mut sink, &block_tokens).expect("encoding a freshly-built plan never fails");
    }

    sink.finish()
}

fn read_extra_bits(source: &mut BitSource<'_>, count: u8) -> Result<u16> {
    if count == 0 {
        return Ok(0);
    }
    Ok(source.read_bits(count)? as u16)
}

fn decode_block(
    source: &mut BitSource<'_>,
    litlen_tree: &HuffmanTree,
    dist_tree: &HuffmanTree,
    tokens: &mut Vec<Token>,
) -> Result<()> {
    loop {
        let symbol = litlen_tree.decode(source)?;

        if symbol < 256 {
            tokens.push(Token::literal(symbol as u8));
            continue;
        }
        if symbol == END_OF_BLOCK {
            return Ok(());
        }
        if symbol > 285 {
            return Err(Error::invalid_symbol(symbol as u32, LITLEN_ALPHABET_SIZE));
        }

        let length_extra = read_extra_bits(source, tables::LENGTH_EXTRA_BITS[(symbol - 257) as usize])?;
        let length = tables::decode_length(symbol, length_extra)?;

        let distance_symbol = dist_tree.decode(source)?;
        let distance_extra =
            read_extra_bits(source, tables::DISTANCE_EXTRA_BITS[distance_symbol as usize])?;
        let distance = tables::decode_distance(distance_symbol, distance_extra)?;

        let trailing = litlen_tree.decode(source)?;
        if trailing == END_OF_BLOCK {
            tokens.push(Token::reference(distance, length as u32, None));
            return Ok(());
        }
        if trailing > 255 {
            return Err(Error::malformed_stream(
                "unexpected length symbol following a match's trailing literal slot",
            ));
        }
        tokens.push(Token::reference(distance, length as u32, Some(trailing as u8)));
    }
}

/// Decompress a buffer previously produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut source = BitSource::new(data)?;

    if source.bit_count() == 0 {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();

    loop {
        let header = source.read_bits(2)?;

        match header {
            FIXED_BLOCK_HEADER => {
                let litlen_tree = tables::fixed_litlen_tree()?;
                let dist_tree = tables::fixed_distance_tree()?;
                decode_block(&mut source, litlen_tree, dist_tree, &mut tokens)?;
            }
            DYNAMIC_BLOCK_HEADER => {
                let mut litlen_lengths = Vec::with_capacity(LITLEN_ALPHABET_SIZE);
                for _ in 0..LITLEN_ALPHABET_SIZE {
                    litlen_lengths.push(IntegerCodec::decode(&mut source)? as u8);
                }
                let mut dist_lengths = Vec::with_capacity(DISTANCE_ALPHABET_SIZE);
                for _ in 0..DISTANCE_ALPHABET_SIZE {
                    dist_lengths.push(IntegerCodec::decode(&mut source)? as u8);
                }

                let litlen_tree = HuffmanTree::from_code_lengths(&litlen_lengths)?;
                let dist_tree = HuffmanTree::from_code_lengths(&dist_lengths)?;
                decode_block(&mut source, &litlen_tree, &dist_tree, &mut tokens)?;
            }
            other => return Err(Error::invalid_block_header(other as u8)),
        }

        if source.bits_remaining() == 0 {
            break;
        }
    }

    Lz77Matcher::decode(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(data: &[u8]) {
        let compressed = compress(data);
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, data, "roundtrip failed for {} bytes", data.len());
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"");
        assert_eq!(&compressed[..4], &0u32.to_be_bytes());
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_single_byte_uses_fixed_block() {
        let compressed = compress(b"a");
        // First 2 bits of the payload are the block header; fixed = 0b01.
        let mut peek = BitSource::new(&compressed).unwrap();
        let header = peek.read_bits(2).unwrap();
        assert_eq!(header, FIXED_BLOCK_HEADER);
        roundtrip(b"a");
    }

    #[test]
    fn test_repeated_byte_compresses_small() {
        let data = vec![b'a'; 1000];
        let compressed = compress(&data);
        assert!(compressed.len() < 200);
        roundtrip(&data);
    }

    #[test]
    fn test_abcabc_roundtrip() {
        roundtrip(b"abcabcabcabc");
    }

    #[test]
    fn test_all_byte_values_use_dynamic_block() {
        let data: Vec<u8> = (0..10).flat_map(|_| 0u8..=255).collect();
        roundtrip(&data);
    }

    #[test]
    fn test_long_text_splits_into_multiple_blocks_and_shrinks() {
        let data = "The quick brown fox jumps over the lazy dog. ".repeat(1000);
        let compressed = compress(data.as_bytes());
        assert!(compressed.len() < data.len());
        roundtrip(data.as_bytes());
    }

    #[test]
    fn test_binary_data_roundtrip() {
        let data: Vec<u8> = (0..5000u32).map(|i| ((i * 37 + 11) % 256) as u8).collect();
        roundtrip(&data);
    }

    #[test]
    fn test_invalid_block_header_rejected() {
        // bitCount = 32, payload starting with the reserved "11" header.
        let mut data = 32u32.to_be_bytes().to_vec();
        data.push(0b1100_0000);
        data.extend_from_slice(&[0, 0, 0]);
        assert!(decompress(&data).is_err());
    }

    #[test]
    fn test_truncated_stream_is_malformed_not_a_crash() {
        let compressed = compress(b"hello world hello world hello world");
        let truncated = &compressed[..compressed.len() / 2];
        // May succeed partially or error; must not panic.
        let _ = decompress(truncated);
    }
}
