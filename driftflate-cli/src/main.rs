//! driftflate CLI - compress and decompress files with the driftflate codec.

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use commands::{cmd_compress, cmd_decompress, cmd_test};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "driftflate")]
#[command(author, version, about = "A DEFLATE-style byte-buffer compressor")]
#[command(long_about = "
driftflate compresses and decompresses byte buffers with a private,
non-interoperable DEFLATE-style wire format (LZ77 + canonical Huffman).

Examples:
  driftflate compress input.txt
  driftflate compress input.txt -o input.txt.dfl
  driftflate decompress input.txt.dfl -o restored.txt
  driftflate test input.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        path: PathBuf,

        /// Output file (default: <path>.deflate)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        path: PathBuf,

        /// Output file (default: <path> with .deflate stripped, or <path>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Round-trip a file through compress/decompress and verify it matches
    #[command(alias = "t")]
    Test {
        /// File to test
        path: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(hide = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress { path, output } => cmd_compress(&path, output.as_deref()),
        Commands::Decompress { path, output } => cmd_decompress(&path, output.as_deref()),
        Commands::Test { path } => cmd_test(&path),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "driftflate", &mut io::stdout());
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
