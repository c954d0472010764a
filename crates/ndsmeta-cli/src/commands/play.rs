//! Play command implementation.
//!
//! Loads the banner animation of a ROM into one engine slot and prints the
//! frame the menu would draw on each tick.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use ndsmeta_core::{Banner, IconAnimationEngine, NdsHeader};
use tracing::warn;

/// Run the play command
pub fn run(rom: &Path, ticks: usize, slot: usize) -> Result<()> {
    let file = File::open(rom).with_context(|| format!("Failed to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);

    let header = NdsHeader::read_from(&mut reader)?;
    let mut engine = IconAnimationEngine::new();

    match Banner::read_from(&mut reader, &header)? {
        Some(banner) => {
            if !banner.is_animated() {
                warn!(
                    "Banner version 0x{:04X} has no animated icon",
                    banner.version()
                );
            }
            engine.grab_from_banner(slot, &banner)?;
        }
        None => {
            warn!("{} has no banner", header.title_id);
            engine.clear_banner_sequence(slot)?;
        }
    }

    let tokens = engine.slot(slot)?.sequence();
    let used = tokens.iter().position(|&t| t == 0).unwrap_or(tokens.len());
    println!(
        "{} slot {}: {} tokens {:04X?}",
        header.title_id,
        slot,
        used,
        &tokens[..used]
    );

    println!("{:>5}  {:>6}  {:>3}  {:<10}  {:>5}", "tick", "cursor", "row", "flip", "delay");
    for tick in 0..ticks {
        let cursor = engine.slot(slot)?.cursor();
        let frame = engine.play_banner_sequence(slot)?;
        let delay = engine.slot(slot)?.delay();
        println!(
            "{:>5}  {:>6}  {:>3}  {:<10}  {:>5}",
            tick,
            cursor,
            frame.row,
            frame.flip.to_string(),
            delay
        );
    }

    Ok(())
}
