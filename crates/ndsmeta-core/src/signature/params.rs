//! SDK module parameter lookup
//!
//! Games built with the official SDK embed a small parameter block in the
//! ARM9 binary, immediately followed by a two-word marker. The block is found
//! by scanning for the marker and stepping back `MARKER_OFFSET` bytes.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};

use serde::Serialize;
use tracing::{debug, info};

use super::scanner::{Direction, WordSignature};
use crate::error::Result;
use crate::rom::header::{NdsHeader, read_up_to};
use crate::rom::layout::{module_params, read_u32};

/// Parameter block preceding the module-params marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleParams {
    pub auto_load_list_offset: u32,
    pub auto_load_list_end: u32,
    pub auto_load_start: u32,
    pub static_bss_start: u32,
    pub static_bss_end: u32,
    pub compressed_static_end: u32,
    pub sdk_version: u32,
}

impl ModuleParams {
    /// Read the block starting at `offset`. `None` if it does not fit.
    pub fn read_at(bytes: &[u8], offset: usize) -> Option<Self> {
        if offset.checked_add(module_params::MARKER_OFFSET)? > bytes.len() {
            return None;
        }
        let field = |rel: usize| read_u32(bytes, offset + rel);
        Some(Self {
            auto_load_list_offset: field(module_params::AUTO_LOAD_LIST_OFFSET),
            auto_load_list_end: field(module_params::AUTO_LOAD_LIST_END),
            auto_load_start: field(module_params::AUTO_LOAD_START),
            static_bss_start: field(module_params::STATIC_BSS_START),
            static_bss_end: field(module_params::STATIC_BSS_END),
            compressed_static_end: field(module_params::COMPRESSED_STATIC_END),
            sdk_version: field(module_params::SDK_VERSION),
        })
    }

    pub fn sdk(&self) -> SdkVersion {
        SdkVersion(self.sdk_version)
    }
}

/// Decoded view of the raw `sdk_version` word (`0xMMmmRRRR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SdkVersion(pub u32);

impl SdkVersion {
    pub fn major(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn minor(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn relstep(&self) -> u16 {
        self.0 as u16
    }

    /// 0 is what the lookup returns when no marker exists
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("unknown");
        }
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.relstep())
    }
}

/// Configuration for the module params lookup
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// ARM9 bytes loaded for the scan; larger binaries are truncated
    pub max_arm9_size: usize,
    /// Marker searched for in the ARM9 binary
    pub marker: WordSignature,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_arm9_size: module_params::MAX_ARM9_SCAN_SIZE,
            marker: WordSignature::module_params(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new configuration builder
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }
}

/// Builder for ExtractorConfig
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfigBuilder {
    max_arm9_size: Option<usize>,
    marker: Option<WordSignature>,
}

impl ExtractorConfigBuilder {
    /// Set the cap on ARM9 bytes loaded for the scan
    pub fn max_arm9_size(mut self, size: usize) -> Self {
        self.max_arm9_size = Some(size);
        self
    }

    /// Override the marker signature
    pub fn marker(mut self, marker: WordSignature) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn build(self) -> ExtractorConfig {
        let default = ExtractorConfig::default();
        ExtractorConfig {
            max_arm9_size: self.max_arm9_size.unwrap_or(default.max_arm9_size),
            marker: self.marker.unwrap_or(default.marker),
        }
    }
}

/// Finds the module params block of a ROM's ARM9 binary.
///
/// Holds a scratch buffer that is reused across lookups, so one extractor can
/// walk a whole ROM list without reallocating.
pub struct ModuleParamsExtractor {
    config: ExtractorConfig,
    scratch: Vec<u8>,
}

impl ModuleParamsExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// SDK version of the ROM, or 0 when the marker is absent
    pub fn sdk_version<R: Read + Seek>(&mut self, rom: &mut R) -> Result<u32> {
        Ok(self
            .module_params(rom)?
            .map(|params| params.sdk_version)
            .unwrap_or(0))
    }

    /// Load the ARM9 binary and locate its parameter block
    pub fn module_params<R: Read + Seek>(&mut self, rom: &mut R) -> Result<Option<ModuleParams>> {
        let header = NdsHeader::read_from(rom)?;
        self.module_params_with_header(rom, &header)
    }

    /// Same as `module_params`, for callers that already parsed the header
    pub fn module_params_with_header<R: Read + Seek>(
        &mut self,
        rom: &mut R,
        header: &NdsHeader,
    ) -> Result<Option<ModuleParams>> {
        self.load_arm9(rom, header)?;
        Ok(Self::locate_with(&self.config.marker, &self.scratch))
    }

    /// Locate the parameter block in an already-loaded ARM9 binary
    pub fn locate(&self, arm9: &[u8]) -> Option<ModuleParams> {
        Self::locate_with(&self.config.marker, arm9)
    }

    fn locate_with(marker: &WordSignature, arm9: &[u8]) -> Option<ModuleParams> {
        let Some(marker_offset) = marker.scan_bytes(arm9, Direction::Forward) else {
            debug!("Module params marker not found in {} bytes", arm9.len());
            return None;
        };

        let Some(params_offset) = marker_offset.checked_sub(module_params::MARKER_OFFSET) else {
            debug!(
                "Module params marker at 0x{:X} leaves no room for the block",
                marker_offset
            );
            return None;
        };

        let params = ModuleParams::read_at(arm9, params_offset)?;
        info!(
            "Module params at ARM9+0x{:X}: sdk_version=0x{:08X} ({})",
            params_offset,
            params.sdk_version,
            params.sdk()
        );
        Some(params)
    }

    fn load_arm9<R: Read + Seek>(&mut self, rom: &mut R, header: &NdsHeader) -> Result<()> {
        let declared = header.arm9.size as usize;
        let len = declared.min(self.config.max_arm9_size);
        if declared > len {
            debug!(
                "ARM9 size 0x{:X} truncated to 0x{:X} for scanning",
                declared, len
            );
        }

        rom.seek(SeekFrom::Start(header.arm9.rom_offset as u64))?;
        self.scratch.clear();
        self.scratch.resize(len, 0);
        let read = read_up_to(rom, &mut self.scratch)?;
        if read < len {
            debug!(
                "ARM9 region ends early: read 0x{:X} of 0x{:X} bytes",
                read, len
            );
            self.scratch.truncate(read);
        }
        Ok(())
    }
}

impl Default for ModuleParamsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) fn params_block_bytes(sdk_version: u32) -> Vec<u8> {
    let mut block = Vec::with_capacity(module_params::MARKER_OFFSET + 8);
    for value in [0x0200_1000u32, 0x0200_1010, 0x0210_0000, 0x0210_0000, 0x0210_4000, 0] {
        block.extend_from_slice(&value.to_le_bytes());
    }
    block.extend_from_slice(&sdk_version.to_le_bytes());
    for word in module_params::MARKER {
        block.extend_from_slice(&word.to_le_bytes());
    }
    block
}
