//! Format-agnostic bit-level primitives for driftflate.
//!
//! This crate has no knowledge of DEFLATE block structure or Huffman coding;
//! it provides the two low-level building blocks the codec layer composes:
//!
//! - [`bitstream`] — `BitSink`/`BitSource`, a length-prefixed, MSB-first
//!   bit-packed buffer format.
//! - [`integer`] — `IntegerCodec`, the unary-prefixed variable-length integer
//!   encoding used to serialize the dynamic-block code-length table.
//!
//! `driftflate-codec` builds directly on top of this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod error;
pub mod integer;

pub use bitstream::{BitSink, BitSource};
pub use error::{Error, Result};
pub use integer::IntegerCodec;
