//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod hex_utils;
pub mod info;
pub mod play;
pub mod scan;
