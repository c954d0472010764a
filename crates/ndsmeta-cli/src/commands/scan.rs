//! Scan command implementation.
//!
//! Loads a region of a file and searches it for a word signature, the same
//! way the SDK version lookup searches the ARM9 binary.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result, bail};
use ndsmeta_core::{Direction, WordSignature};

use super::hex_utils::hex_bytes;

/// Run the scan command
pub fn run(
    file: &Path,
    pattern: &str,
    offset: u64,
    length: Option<u64>,
    backward: bool,
) -> Result<()> {
    let signature: WordSignature = pattern.parse()?;
    let direction = if backward {
        Direction::Backward
    } else {
        Direction::Forward
    };

    let mut file = File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let file_len = file.metadata()?.len();
    if offset > file_len {
        bail!("Offset 0x{:X} is past the end of the file (0x{:X})", offset, file_len);
    }

    let available = file_len - offset;
    let len = length.map_or(available, |l| l.min(available));

    file.seek(SeekFrom::Start(offset))?;
    let mut region = Vec::with_capacity(len as usize);
    file.take(len).read_to_end(&mut region)?;

    println!(
        "Scanning 0x{:X} bytes at 0x{:X} for [{}] ({:?})",
        region.len(),
        offset,
        signature,
        direction
    );

    match signature.scan_bytes(&region, direction) {
        Some(found) => {
            let end = (found + signature.len() * 4).min(region.len());
            println!("Found at 0x{:X} (region +0x{:X})", offset + found as u64, found);
            println!("  {}", hex_bytes(&region[found..end]));
        }
        None => println!("Not found"),
    }

    Ok(())
}
