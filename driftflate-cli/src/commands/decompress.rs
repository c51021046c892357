//! Decompress command implementation.

use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(path)?;
    let decompressed = driftflate_codec::decompress(&data)?;

    let out_path: PathBuf = match output {
        Some(p) => p.to_path_buf(),
        None => match path.extension().and_then(|e| e.to_str()) {
            Some("deflate") => path.with_extension(""),
            _ => {
                let mut name = path.as_os_str().to_os_string();
                name.push(".out");
                PathBuf::from(name)
            }
        },
    };
    fs::write(&out_path, &decompressed)?;

    println!("Decompressed {} -> {}", path.display(), out_path.display());
    println!(
        "  {} bytes -> {} bytes",
        data.len(),
        decompressed.len()
    );

    Ok(())
}
