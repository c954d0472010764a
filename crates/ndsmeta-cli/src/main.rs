use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::hex_utils::parse_hex;

#[derive(Parser)]
#[command(name = "ndsmeta")]
#[command(about = "DS cartridge metadata and banner animation tool")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show header, SDK version and banner titles
    Info {
        rom: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the four-character title ID
    Tid { rom: PathBuf },
    /// Print the SDK version from the module params block
    Sdk {
        rom: PathBuf,
        /// Maximum ARM9 bytes to scan (hex)
        #[arg(long, value_parser = parse_hex)]
        max_size: Option<u64>,
    },
    /// Search a file region for a word signature
    Scan {
        file: PathBuf,
        /// Whitespace-separated hex words
        #[arg(short, long, default_value = "DEC00621 2106C0DE")]
        pattern: String,
        /// Region start (hex)
        #[arg(long, value_parser = parse_hex, default_value = "0")]
        offset: u64,
        /// Region length (hex); defaults to the rest of the file
        #[arg(long, value_parser = parse_hex)]
        length: Option<u64>,
        /// Scan from the end of the region
        #[arg(long)]
        backward: bool,
    },
    /// Decode a ROM's animated banner icon tick by tick
    Play {
        rom: PathBuf,
        /// Number of ticks to simulate
        #[arg(short, long, default_value_t = 120)]
        ticks: usize,
        /// Engine slot to load the sequence into
        #[arg(short, long, default_value_t = 0)]
        slot: usize,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ndsmeta=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Info { rom, json, output } => commands::info::run(&rom, json, output.as_deref()),
        Command::Tid { rom } => commands::info::run_tid(&rom),
        Command::Sdk { rom, max_size } => commands::info::run_sdk(&rom, max_size),
        Command::Scan {
            file,
            pattern,
            offset,
            length,
            backward,
        } => commands::scan::run(&file, &pattern, offset, length, backward),
        Command::Play { rom, ticks, slot } => commands::play::run(&rom, ticks, slot),
    }
}
