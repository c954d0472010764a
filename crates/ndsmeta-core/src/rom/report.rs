//! Whole-ROM metadata summary

use std::fs;
use std::io::{Read, Seek};
use std::path::Path;

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::warn;

use super::banner::{Banner, Language};
use super::header::{ExecutableRegion, NdsHeader, TitleId};
use crate::error::Result;
use crate::signature::{ModuleParams, ModuleParamsExtractor, SdkVersion};

/// One non-empty banner title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerTitle {
    pub language: Language,
    pub text: String,
}

/// Metadata gathered from a ROM image
#[derive(Debug, Clone, Serialize)]
pub struct RomReport {
    pub game_title: String,
    pub title_id: TitleId,
    pub maker_code: String,
    pub unit_code: u8,
    pub arm9: ExecutableRegion,
    pub arm7: ExecutableRegion,
    /// Raw SDK version word, 0 when unknown
    pub sdk_version: u32,
    /// SDK version as `major.minor.relstep`
    pub sdk: String,
    pub module_params: Option<ModuleParams>,
    pub banner_version: Option<u16>,
    pub animated_icon: bool,
    pub titles: Vec<BannerTitle>,
}

impl RomReport {
    /// Inspect a ROM. Header failures propagate; a missing or broken banner
    /// only leaves the banner fields empty.
    pub fn inspect<R: Read + Seek>(
        rom: &mut R,
        extractor: &mut ModuleParamsExtractor,
    ) -> Result<Self> {
        let header = NdsHeader::read_from(rom)?;
        let module_params = extractor.module_params_with_header(rom, &header)?;
        let sdk_version = module_params.map(|p| p.sdk_version).unwrap_or(0);

        let banner = match Banner::read_from(rom, &header) {
            Ok(banner) => banner,
            Err(e) => {
                warn!("Failed to read banner at 0x{:X}: {}", header.banner_offset, e);
                None
            }
        };

        let titles = banner
            .as_ref()
            .map(|banner| {
                Language::iter()
                    .filter_map(|language| {
                        banner
                            .title(language)
                            .filter(|text| !text.is_empty())
                            .map(|text| BannerTitle { language, text })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            game_title: header.game_title,
            title_id: header.title_id,
            maker_code: header.maker_code,
            unit_code: header.unit_code,
            arm9: header.arm9,
            arm7: header.arm7,
            sdk_version,
            sdk: SdkVersion(sdk_version).to_string(),
            module_params,
            banner_version: banner.as_ref().map(Banner::version),
            animated_icon: banner.as_ref().is_some_and(Banner::is_animated),
            titles,
        })
    }

    pub fn title(&self, language: Language) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.language == language)
            .map(|t| t.text.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
