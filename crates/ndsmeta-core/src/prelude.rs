//! Prelude module for convenient imports
//!
//! ```ignore
//! use ndsmeta_core::prelude::*;
//! ```

// Error handling
pub use crate::error::{Error, Result};

// ROM metadata
pub use crate::rom::{Banner, Language, NdsHeader, RomReport, TitleId, read_title_id};

// Signature scanning
pub use crate::signature::{Direction, ExtractorConfig, ModuleParamsExtractor, WordSignature};

// Icon animation
pub use crate::icon::{FlipMode, IconAnimationEngine, IconFrame};
