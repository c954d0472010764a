//! Banner icon animation
//!
//! Animated (DSi) banners carry up to 64 tokens per icon. The engine keeps one
//! slot per icon on the menu and turns those tokens into the tile row and
//! mirroring to draw on every display tick.

mod engine;
mod slot;
mod token;

pub use engine::*;
pub use slot::*;
pub use token::*;
