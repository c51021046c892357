//! CLI command implementations.

mod compress;
mod decompress;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use test::cmd_test;
