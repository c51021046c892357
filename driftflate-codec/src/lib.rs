//! A DEFLATE-style LZ77 + canonical Huffman compression engine.
//!
//! ```
//! let original = b"abcabcabcabc";
//! let compressed = driftflate_codec::compress(original);
//! let restored = driftflate_codec::decompress(&compressed).unwrap();
//! assert_eq!(restored, original);
//! ```
//!
//! Architecture, leaves first:
//!
//! - [`lz77`] — sliding-window match finder producing `(distance, length, literal?)` tokens.
//! - [`block_splitter`] — decides where one Huffman frame ends and the next begins.
//! - [`huffman`] — canonical code-length derivation and the resulting code tables.
//! - [`tables`] — the length/distance alphabets and the fixed code tables.
//! - [`deflate`] — orchestrates the above into the private wire format.
//!
//! This is not wire-compatible with RFC 1951 DEFLATE: the framing, token
//! shape, and code-length serialization are private to this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block_splitter;
pub mod deflate;
pub mod huffman;
pub mod lz77;
pub mod tables;

pub use block_splitter::BlockSplitter;
pub use deflate::{compress, decompress};
pub use huffman::{HuffmanBuilder, HuffmanCodes, HuffmanTree};
pub use lz77::{Lz77Matcher, Token};
