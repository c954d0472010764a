use std::io::{Read, Seek, SeekFrom};

use encoding_rs::UTF_16LE;
use serde::Serialize;
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};
use tracing::{debug, warn};

use super::header::{NdsHeader, read_up_to};
use super::layout::{banner, read_u16};
use crate::error::{Error, Result};

/// Title languages in banner order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    FromRepr,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Language {
    Japanese = 0,
    English = 1,
    French = 2,
    German = 3,
    Italian = 4,
    Spanish = 5,
    Chinese = 6,
    Korean = 7,
}

impl Language {
    fn title_offset(self) -> usize {
        banner::TITLES + self as usize * banner::TITLE_LEN
    }

    /// Oldest banner version that carries this language
    fn min_version(self) -> u16 {
        match self {
            Self::Chinese => banner::VERSION_CHINESE,
            Self::Korean => banner::VERSION_KOREAN,
            _ => banner::VERSION_BASE,
        }
    }
}

/// Icon/title banner referenced from the cartridge header
#[derive(Debug, Clone)]
pub struct Banner {
    version: u16,
    data: Vec<u8>,
}

impl Banner {
    /// Byte size of a banner with the given version
    pub fn size_for_version(version: u16) -> Option<usize> {
        match version {
            banner::VERSION_BASE => Some(banner::SIZE_BASE),
            banner::VERSION_CHINESE => Some(banner::SIZE_CHINESE),
            banner::VERSION_KOREAN => Some(banner::SIZE_KOREAN),
            banner::VERSION_ANIMATED => Some(banner::SIZE_ANIMATED),
            _ => None,
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(Error::ShortRead {
                what: "banner version",
                expected: 2,
                actual: bytes.len(),
            });
        }

        let version = read_u16(bytes, banner::VERSION);
        let size = Self::size_for_version(version).ok_or_else(|| {
            Error::InvalidBanner(format!("Unknown banner version 0x{:04X}", version))
        })?;

        if bytes.len() < size {
            return Err(Error::ShortRead {
                what: "banner",
                expected: size,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            version,
            data: bytes[..size].to_vec(),
        })
    }

    /// Read the banner the header points at. `None` if the ROM has no banner.
    pub fn read_from<R: Read + Seek>(rom: &mut R, header: &NdsHeader) -> Result<Option<Self>> {
        if header.banner_offset == 0 {
            debug!("No banner (offset is 0)");
            return Ok(None);
        }

        rom.seek(SeekFrom::Start(header.banner_offset as u64))?;
        let mut version_bytes = [0u8; 2];
        let read = read_up_to(rom, &mut version_bytes)?;
        if read < version_bytes.len() {
            return Err(Error::ShortRead {
                what: "banner version",
                expected: 2,
                actual: read,
            });
        }

        let version = u16::from_le_bytes(version_bytes);
        let Some(size) = Self::size_for_version(version) else {
            warn!(
                "Unknown banner version 0x{:04X} at 0x{:X}",
                version, header.banner_offset
            );
            return Err(Error::InvalidBanner(format!(
                "Unknown banner version 0x{:04X}",
                version
            )));
        };

        let mut data = vec![0u8; size];
        data[..2].copy_from_slice(&version_bytes);
        let read = read_up_to(rom, &mut data[2..])? + 2;
        if read < size {
            return Err(Error::ShortRead {
                what: "banner",
                expected: size,
                actual: read,
            });
        }

        debug!(
            "Banner: version=0x{:04X} size=0x{:X} at 0x{:X}",
            version, size, header.banner_offset
        );
        Ok(Some(Self { version, data }))
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    /// DSi banners carry an animated icon and its token sequence
    pub fn is_animated(&self) -> bool {
        self.version == banner::VERSION_ANIMATED
    }

    /// Title in the given language, cut at the first NUL
    pub fn title(&self, language: Language) -> Option<String> {
        if self.version < language.min_version() {
            return None;
        }

        let start = language.title_offset();
        let raw = &self.data[start..start + banner::TITLE_LEN];
        let len = raw
            .chunks_exact(2)
            .position(|unit| unit == [0u8, 0])
            .map(|units| units * 2)
            .unwrap_or(raw.len());

        let (decoded, _) = UTF_16LE.decode_without_bom_handling(&raw[..len]);
        Some(decoded.trim_end().to_string())
    }

    /// The 64 animation tokens of an animated banner
    pub fn animation_sequence(&self) -> Option<[u16; banner::ANIMATION_SEQUENCE_LEN]> {
        if !self.is_animated() {
            return None;
        }

        let mut tokens = [0u16; banner::ANIMATION_SEQUENCE_LEN];
        for (i, token) in tokens.iter_mut().enumerate() {
            *token = read_u16(&self.data, banner::ANIMATION_SEQUENCE + i * 2);
        }
        Some(tokens)
    }
}

#[cfg(test)]
pub(crate) fn sample_banner_bytes(version: u16, english: &str) -> Vec<u8> {
    let size = Banner::size_for_version(version).unwrap();
    let mut bytes = vec![0u8; size];
    bytes[..2].copy_from_slice(&version.to_le_bytes());

    let offset = Language::English.title_offset();
    for (i, unit) in english.encode_utf16().enumerate() {
        bytes[offset + i * 2..offset + i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    bytes
}
