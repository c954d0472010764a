use std::fmt;
use std::io::{Read, Seek, SeekFrom};

use serde::{Serialize, Serializer};
use tracing::debug;

use super::layout::{header, read_u32};
use crate::error::{Error, Result};

/// Four-character game code, e.g. `ASME`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleId(pub [u8; 4]);

impl TitleId {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Serialize for TitleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Location of an executable inside the image and where it is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutableRegion {
    pub rom_offset: u32,
    pub entry: u32,
    pub ram_address: u32,
    pub size: u32,
}

/// Parsed cartridge header
#[derive(Debug, Clone, Serialize)]
pub struct NdsHeader {
    pub game_title: String,
    pub title_id: TitleId,
    pub maker_code: String,
    pub unit_code: u8,
    pub rom_version: u8,
    pub arm9: ExecutableRegion,
    pub arm7: ExecutableRegion,
    pub banner_offset: u32,
}

impl NdsHeader {
    /// Parse a header from the first `header::SIZE` bytes of an image
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < header::SIZE {
            return Err(Error::ShortRead {
                what: "ROM header",
                expected: header::SIZE,
                actual: bytes.len(),
            });
        }

        let title_end = header::GAME_TITLE + header::GAME_TITLE_LEN;
        let game_title = ascii_field(&bytes[header::GAME_TITLE..title_end]);

        let mut code = [0u8; 4];
        code.copy_from_slice(&bytes[header::GAME_CODE..header::GAME_CODE + header::GAME_CODE_LEN]);

        let maker_end = header::MAKER_CODE + header::MAKER_CODE_LEN;
        let maker_code = ascii_field(&bytes[header::MAKER_CODE..maker_end]);

        Ok(Self {
            game_title,
            title_id: TitleId(code),
            maker_code,
            unit_code: bytes[header::UNIT_CODE],
            rom_version: bytes[header::ROM_VERSION],
            arm9: ExecutableRegion {
                rom_offset: read_u32(bytes, header::ARM9_ROM_OFFSET),
                entry: read_u32(bytes, header::ARM9_ENTRY),
                ram_address: read_u32(bytes, header::ARM9_RAM_ADDRESS),
                size: read_u32(bytes, header::ARM9_SIZE),
            },
            arm7: ExecutableRegion {
                rom_offset: read_u32(bytes, header::ARM7_ROM_OFFSET),
                entry: read_u32(bytes, header::ARM7_ENTRY),
                ram_address: read_u32(bytes, header::ARM7_RAM_ADDRESS),
                size: read_u32(bytes, header::ARM7_SIZE),
            },
            banner_offset: read_u32(bytes, header::BANNER_OFFSET),
        })
    }

    /// Read and parse the header from the start of a ROM
    pub fn read_from<R: Read + Seek>(rom: &mut R) -> Result<Self> {
        rom.seek(SeekFrom::Start(0))?;
        let mut buf = vec![0u8; header::SIZE];
        let read = read_up_to(rom, &mut buf)?;
        if read < header::SIZE {
            return Err(Error::ShortRead {
                what: "ROM header",
                expected: header::SIZE,
                actual: read,
            });
        }

        let parsed = Self::parse(&buf)?;
        debug!(
            "Header: title={:?} code={} arm9=0x{:X}+0x{:X} banner=0x{:X}",
            parsed.game_title,
            parsed.title_id,
            parsed.arm9.rom_offset,
            parsed.arm9.size,
            parsed.banner_offset
        );
        Ok(parsed)
    }

    /// Unit code 0x02 and 0x03 mark DSi-enhanced and DSi-exclusive titles
    pub fn is_dsi_title(&self) -> bool {
        self.unit_code & 0x02 != 0
    }
}

/// Read the four-byte title ID without parsing the rest of the header
pub fn read_title_id<R: Read + Seek>(rom: &mut R) -> Result<TitleId> {
    rom.seek(SeekFrom::Start(header::GAME_CODE as u64))?;
    let mut code = [0u8; header::GAME_CODE_LEN];
    let read = read_up_to(rom, &mut code)?;
    if read != code.len() {
        return Err(Error::ShortRead {
            what: "title ID",
            expected: code.len(),
            actual: read,
        });
    }
    Ok(TitleId(code))
}

/// Fill as much of `buf` as the source provides, like a single `fread`
pub(crate) fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn ascii_field(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).trim_end().to_string()
}

// Used by the banner tests as well
#[cfg(test)]
pub(crate) fn sample_header_bytes() -> Vec<u8> {
    let mut bytes = vec![0u8; header::SIZE];
    bytes[..9].copy_from_slice(b"TESTTITLE");
    bytes[header::GAME_CODE..header::GAME_CODE + 4].copy_from_slice(b"ATSE");
    bytes[header::MAKER_CODE..header::MAKER_CODE + 2].copy_from_slice(b"01");
    bytes[header::UNIT_CODE] = 0x00;
    bytes[header::ROM_VERSION] = 0x01;
    bytes[header::ARM9_ROM_OFFSET..header::ARM9_ROM_OFFSET + 4]
        .copy_from_slice(&0x4000u32.to_le_bytes());
    bytes[header::ARM9_ENTRY..header::ARM9_ENTRY + 4]
        .copy_from_slice(&0x0200_0800u32.to_le_bytes());
    bytes[header::ARM9_RAM_ADDRESS..header::ARM9_RAM_ADDRESS + 4]
        .copy_from_slice(&0x0200_0000u32.to_le_bytes());
    bytes[header::ARM9_SIZE..header::ARM9_SIZE + 4].copy_from_slice(&0x100u32.to_le_bytes());
    bytes[header::BANNER_OFFSET..header::BANNER_OFFSET + 4]
        .copy_from_slice(&0x8000u32.to_le_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_header_fields() {
        let header = NdsHeader::parse(&sample_header_bytes()).unwrap();
        assert_eq!(header.game_title, "TESTTITLE");
        assert_eq!(header.title_id.to_string(), "ATSE");
        assert_eq!(header.maker_code, "01");
        assert_eq!(header.rom_version, 1);
        assert_eq!(header.arm9.rom_offset, 0x4000);
        assert_eq!(header.arm9.entry, 0x0200_0800);
        assert_eq!(header.arm9.ram_address, 0x0200_0000);
        assert_eq!(header.arm9.size, 0x100);
        assert_eq!(header.arm7, ExecutableRegion::default());
        assert_eq!(header.banner_offset, 0x8000);
        assert!(!header.is_dsi_title());
    }

    #[test]
    fn test_parse_header_too_short() {
        let err = NdsHeader::parse(&[0u8; 0x40]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead {
                expected: 0x200,
                actual: 0x40,
                ..
            }
        ));
    }

    #[test]
    fn test_read_header_from_truncated_file() {
        let mut rom = Cursor::new(vec![0u8; 0x100]);
        let err = NdsHeader::read_from(&mut rom).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_read_title_id() {
        let mut rom = Cursor::new(sample_header_bytes());
        let tid = read_title_id(&mut rom).unwrap();
        assert_eq!(tid.as_bytes(), b"ATSE");
    }

    #[test]
    fn test_read_title_id_short_read() {
        let mut rom = Cursor::new(vec![0u8; 0x0E]);
        let err = read_title_id(&mut rom).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_title_id_display_masks_unprintable() {
        let tid = TitleId([b'A', 0x00, b'B', 0xFF]);
        assert_eq!(tid.to_string(), "A.B.");
    }

    #[test]
    fn test_title_id_serializes_as_string() {
        let json = serde_json::to_string(&TitleId(*b"ASME")).unwrap();
        assert_eq!(json, "\"ASME\"");
    }
}
