//! Compress command implementation.

use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_compress(path: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(path)?;
    let compressed = driftflate_codec::compress(&data);

    let out_path: PathBuf = match output {
        Some(p) => p.to_path_buf(),
        None => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".deflate");
            PathBuf::from(name)
        }
    };
    fs::write(&out_path, &compressed)?;

    let ratio = if data.is_empty() {
        1.0
    } else {
        compressed.len() as f64 / data.len() as f64
    };
    println!("Compressed {} -> {}", path.display(), out_path.display());
    println!(
        "  {} bytes -> {} bytes ({:.1}% of original)",
        data.len(),
        compressed.len(),
        ratio * 100.0
    );

    Ok(())
}
