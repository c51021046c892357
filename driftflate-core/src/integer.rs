//! Variable-length integer encoding used for the dynamic-block code-length
//! table.
//!
//! An integer `n` is encoded as a unary run of `bits(n) - 1` one-bits, a
//! zero separator bit, and then the binary representation of `n` with its
//! leading one-bit stripped (`bits(n) - 1` payload bits — one per unary
//! bit). `n = 0` is the degenerate case: zero one-bits, a single zero
//! separator bit, and an empty payload.

use crate::bitstream::{BitSink, BitSource};
use crate::error::Result;

/// Encodes and decodes non-negative integers against a [`BitSink`]/[`BitSource`].
pub struct IntegerCodec;

impl IntegerCodec {
    /// Append the encoding of `n` to `sink`.
    pub fn encode(sink: &mut BitSink, n: u32) {
        if n == 0 {
            sink.push_bit(false);
            return;
        }

        let bits = 32 - n.leading_zeros();
        for _ in 0..bits - 1 {
            sink.push_bit(true);
        }
        sink.push_bit(false);

        // Drop the leading 1 bit; only the remaining `bits - 1` bits are payload.
        for i in (0..bits - 1).rev() {
            sink.push_bit((n >> i) & 1 != 0);
        }
    }

    /// Read one encoded integer from `source`.
    pub fn decode(source: &mut BitSource<'_>) -> Result<u32> {
        let mut unary = 0u32;
        while source.read_bit()? {
            unary += 1;
        }
        if unary == 0 {
            return Ok(0);
        }

        let mut value = 1u32;
        for _ in 0..unary {
            value = (value << 1) | source.read_bit()? as u32;
        }
        Ok(value)
    }
}
