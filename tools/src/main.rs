use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codec::CodecLimits;
use tilecodec_tools::{decode_to_json, encode_json, inspect_bytes};

#[derive(Parser)]
#[command(
    name = "tilecodec-tools",
    version,
    about = "tilecodec map conversion and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a JSON map description into the binary format.
    Encode {
        /// Path to the map JSON.
        map_file: PathBuf,
        /// Output path for the compressed stream.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decompress a binary map back into JSON.
    Decode {
        /// Path to the compressed stream.
        map_file: PathBuf,
        /// Output path for the map JSON.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print dimensions, palette, and size figures for a compressed map.
    Inspect {
        /// Path to the compressed stream.
        map_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Encode { map_file, output } => {
            let json = fs::read_to_string(&map_file)
                .with_context(|| format!("read map {}", map_file.display()))?;
            let bytes = encode_json(&json)?;
            fs::write(&output, &bytes)
                .with_context(|| format!("write stream {}", output.display()))?;
            println!("{} bytes written to {}", bytes.len(), output.display());
        }
        Command::Decode { map_file, output } => {
            let bytes = fs::read(&map_file)
                .with_context(|| format!("read stream {}", map_file.display()))?;
            let json = decode_to_json(&bytes, &CodecLimits::default())?;
            fs::write(&output, &json)
                .with_context(|| format!("write map {}", output.display()))?;
            println!("map written to {}", output.display());
        }
        Command::Inspect { map_file } => {
            let bytes = fs::read(&map_file)
                .with_context(|| format!("read stream {}", map_file.display()))?;
            let report = inspect_bytes(&bytes, &CodecLimits::default())?;
            println!("{report}");
        }
    }
    Ok(())
}
