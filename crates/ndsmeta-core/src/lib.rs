//! # ndsmeta-core
//!
//! Core library for reading DS cartridge metadata and playing banner icon
//! animations.
//!
//! This crate provides:
//! - ROM header, title ID and banner parsing
//! - Word-aligned signature scanning
//! - SDK version lookup via the module params marker
//! - Per-icon banner animation playback for a 39-icon menu

pub mod error;
pub mod icon;
pub mod prelude;
pub mod rom;
pub mod signature;

pub use error::{Error, Result};
pub use icon::{
    AnimationToken, FlipMode, ICON_SLOTS, IconAnimationEngine, IconFrame, IconSlot, SEQUENCE_LEN,
    STATIC_ICON_MARKER,
};
pub use rom::{
    Banner, BannerTitle, ExecutableRegion, Language, NdsHeader, RomReport, TitleId, read_title_id,
};
pub use signature::{
    Direction, ExtractorConfig, ExtractorConfigBuilder, ModuleParams, ModuleParamsExtractor,
    SdkVersion, WordSignature, format_signature, parse_signature, scan_words, words_from_le_bytes,
};
