//! Info, tid and sdk command implementations.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use ndsmeta_core::{
    ExtractorConfig, ModuleParamsExtractor, RomReport, SdkVersion, read_title_id,
};
use tracing::info;

fn open_rom(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Run the info command
pub fn run(rom: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let mut reader = open_rom(rom)?;
    let mut extractor = ModuleParamsExtractor::new();
    let report = RomReport::inspect(&mut reader, &mut extractor)?;

    if let Some(path) = output {
        report.save(path)?;
        info!("Report written to {}", path.display());
    }

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("Title:       {}", report.game_title);
    println!("Title ID:    {}", report.title_id);
    println!("Maker:       {}", report.maker_code);
    println!("Unit code:   0x{:02X}", report.unit_code);
    println!(
        "ARM9:        offset 0x{:X}, size 0x{:X}, load 0x{:08X}, entry 0x{:08X}",
        report.arm9.rom_offset, report.arm9.size, report.arm9.ram_address, report.arm9.entry
    );
    println!(
        "ARM7:        offset 0x{:X}, size 0x{:X}, load 0x{:08X}, entry 0x{:08X}",
        report.arm7.rom_offset, report.arm7.size, report.arm7.ram_address, report.arm7.entry
    );
    println!("SDK version: {} (0x{:08X})", report.sdk, report.sdk_version);

    match report.banner_version {
        Some(version) => {
            println!(
                "Banner:      version 0x{:04X}{}",
                version,
                if report.animated_icon { ", animated icon" } else { "" }
            );
            for title in &report.titles {
                let text = title.text.replace('\n', " / ");
                println!("  {:<9} {}", title.language, text);
            }
        }
        None => println!("Banner:      none"),
    }

    Ok(())
}

/// Run the tid command
pub fn run_tid(rom: &Path) -> Result<()> {
    let mut reader = open_rom(rom)?;
    let tid = read_title_id(&mut reader)?;
    println!("{}", tid);
    Ok(())
}

/// Run the sdk command
pub fn run_sdk(rom: &Path, max_size: Option<u64>) -> Result<()> {
    let mut builder = ExtractorConfig::builder();
    if let Some(size) = max_size {
        builder = builder.max_arm9_size(usize::try_from(size).context("Scan size too large")?);
    }

    let mut reader = open_rom(rom)?;
    let mut extractor = ModuleParamsExtractor::with_config(builder.build());
    let version = extractor.sdk_version(&mut reader)?;

    println!("0x{:08X} ({})", version, SdkVersion(version));
    Ok(())
}
