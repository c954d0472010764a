//! Animation token decoding
//!
//! Each 16-bit token describes one step of an animated icon:
//!
//! ```text
//!  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! ┌─────┬────────┬────────┬───────────────────────┐
//! │ V H │ 0 0 0  │  row   │   hold (ticks)        │
//! └─────┴────────┴────────┴───────────────────────┘
//! ```
//!
//! Bits 11–13 must be clear; any other value falls outside the 32 recognised
//! bands and is treated as unknown.

use serde::Serialize;
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

/// Two consecutive tokens marking an icon that does not animate
pub const STATIC_ICON_MARKER: [u16; 2] = [0x0001, 0x0100];

const ROW_SHIFT: u16 = 8;
const ROW_MASK: u16 = 0x07;
const FLIP_SHIFT: u16 = 14;
const RESERVED_MASK: u16 = 0x3800;
const HOLD_MASK: u16 = 0x00FF;

/// How a tile is mirrored when drawn
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    FromRepr,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum FlipMode {
    #[default]
    None = 0,
    Horizontal = 1,
    Vertical = 2,
    Both = 3,
}

impl FlipMode {
    pub fn mirrors_horizontally(&self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub fn mirrors_vertically(&self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// A single animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(pub u16);

impl AnimationToken {
    /// Whether the token falls inside one of the 32 row/flip bands
    pub fn is_recognized(&self) -> bool {
        self.0 & RESERVED_MASK == 0
    }

    /// Tile row 0–7
    pub fn row(&self) -> u8 {
        ((self.0 >> ROW_SHIFT) & ROW_MASK) as u8
    }

    pub fn flip(&self) -> FlipMode {
        // Two bits can only produce 0..=3
        FlipMode::from_repr((self.0 >> FLIP_SHIFT) as u8).unwrap_or_default()
    }

    /// Ticks the token stays on screen
    pub fn hold(&self) -> u16 {
        self.0 & HOLD_MASK
    }

    /// Row and flip, or `None` for a token outside every band
    pub fn decode(&self) -> Option<(u8, FlipMode)> {
        self.is_recognized().then(|| (self.row(), self.flip()))
    }

    /// End-of-sequence marker
    pub fn is_terminator(&self) -> bool {
        self.0 == 0
    }
}
