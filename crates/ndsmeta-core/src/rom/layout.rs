//! Layout constants for DS cartridge data structures
//!
//! This module centralizes the byte offsets used when parsing a ROM image.
//! Constants are organized by structure type. All multi-byte fields are
//! little-endian.

/// Layout of the cartridge header at the start of the image
pub mod header {
    /// Bytes read for the standard header
    pub const SIZE: usize = 0x200;

    pub const GAME_TITLE: usize = 0x00;
    pub const GAME_TITLE_LEN: usize = 12;
    pub const GAME_CODE: usize = 0x0C;
    pub const GAME_CODE_LEN: usize = 4;
    pub const MAKER_CODE: usize = 0x10;
    pub const MAKER_CODE_LEN: usize = 2;
    pub const UNIT_CODE: usize = 0x12;
    pub const ROM_VERSION: usize = 0x1E;

    // ARM9 executable region
    pub const ARM9_ROM_OFFSET: usize = 0x20;
    pub const ARM9_ENTRY: usize = 0x24;
    pub const ARM9_RAM_ADDRESS: usize = 0x28;
    pub const ARM9_SIZE: usize = 0x2C;

    // ARM7 executable region
    pub const ARM7_ROM_OFFSET: usize = 0x30;
    pub const ARM7_ENTRY: usize = 0x34;
    pub const ARM7_RAM_ADDRESS: usize = 0x38;
    pub const ARM7_SIZE: usize = 0x3C;

    pub const BANNER_OFFSET: usize = 0x68;
}

/// Layout of the icon/title banner
pub mod banner {
    pub const VERSION: usize = 0x00;

    pub const VERSION_BASE: u16 = 0x0001;
    pub const VERSION_CHINESE: u16 = 0x0002;
    pub const VERSION_KOREAN: u16 = 0x0003;
    pub const VERSION_ANIMATED: u16 = 0x0103;

    pub const SIZE_BASE: usize = 0x840;
    pub const SIZE_CHINESE: usize = 0x940;
    pub const SIZE_KOREAN: usize = 0xA40;
    pub const SIZE_ANIMATED: usize = 0x23C0;

    /// First title (Japanese); the rest follow at `TITLE_LEN` strides
    pub const TITLES: usize = 0x240;
    pub const TITLE_LEN: usize = 0x100;

    /// 64 little-endian u16 animation tokens
    pub const ANIMATION_SEQUENCE: usize = 0x2340;
    pub const ANIMATION_SEQUENCE_LEN: usize = 64;
}

/// Layout of the SDK module parameter block inside the ARM9 binary
pub mod module_params {
    /// Word size (4 bytes / 32-bit integer)
    pub const WORD: usize = 4;

    /// Marker that sits directly after the parameter block
    pub const MARKER: [u32; 2] = [0xDEC0_0621, 0x2106_C0DE];

    /// Distance from the block start to the marker
    pub const MARKER_OFFSET: usize = 0x1C;

    pub const AUTO_LOAD_LIST_OFFSET: usize = 0;
    pub const AUTO_LOAD_LIST_END: usize = WORD;
    pub const AUTO_LOAD_START: usize = WORD * 2;
    pub const STATIC_BSS_START: usize = WORD * 3;
    pub const STATIC_BSS_END: usize = WORD * 4;
    pub const COMPRESSED_STATIC_END: usize = WORD * 5;
    pub const SDK_VERSION: usize = WORD * 6;

    /// Upper bound on the ARM9 bytes loaded for the marker scan (1 MiB)
    pub const MAX_ARM9_SCAN_SIZE: usize = 0x10_0000;
}

/// Little-endian field readers shared by the parsers
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
