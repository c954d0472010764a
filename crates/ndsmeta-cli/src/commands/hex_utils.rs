//! Hex number parsing and formatting utilities.

use anyhow::Result;

/// Parse a hex number string (with or without 0x prefix).
pub fn parse_hex(s: &str) -> Result<u64> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(s, 16).map_err(|e| anyhow::anyhow!("Invalid hex number: {}", e))
}

/// Render bytes as a spaced hex string, e.g. `21 06 C0 DE`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
