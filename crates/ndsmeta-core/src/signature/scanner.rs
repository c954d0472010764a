//! Word-aligned signature scanning
//!
//! Executable images are searched as sequences of little-endian 32-bit words.
//! A match is only reported at word-aligned positions where the whole pattern
//! fits inside the buffer.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rom::layout::{module_params, read_u32};

/// Scan direction over a word buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// From the first word towards the end
    #[default]
    Forward,
    /// From the last candidate position towards the start
    Backward,
}

impl TryFrom<i32> for Direction {
    type Error = Error;

    /// Map a raw step (`+1` / `-1`) to a direction. Scans only move one word
    /// at a time, so any other step is rejected.
    fn try_from(step: i32) -> Result<Self> {
        match step {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Backward),
            _ => Err(Error::InvalidDirection(step)),
        }
    }
}

/// Find `pattern` in `haystack`, returning the word offset of the first hit
/// in scan order. `None` means the scan exhausted the buffer.
pub fn scan_words(haystack: &[u32], pattern: &[u32], direction: Direction) -> Result<Option<usize>> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }
    Ok(find_window(haystack, pattern, direction))
}

fn find_window(haystack: &[u32], pattern: &[u32], direction: Direction) -> Option<usize> {
    let mut windows = haystack.windows(pattern.len());
    match direction {
        Direction::Forward => windows.position(|window| window == pattern),
        Direction::Backward => windows.rposition(|window| window == pattern),
    }
}

/// View a byte buffer as little-endian words. A trailing partial word is dropped.
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(module_params::WORD)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// A non-empty sequence of words to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSignature {
    words: Vec<u32>,
}

impl WordSignature {
    pub fn new(words: impl Into<Vec<u32>>) -> Result<Self> {
        let words = words.into();
        if words.is_empty() {
            return Err(Error::EmptyPattern);
        }
        Ok(Self { words })
    }

    /// Marker that terminates the SDK module parameter block
    pub fn module_params() -> Self {
        Self {
            words: module_params::MARKER.to_vec(),
        }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true for a constructed signature
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word offset of the first match in scan order
    pub fn scan(&self, haystack: &[u32], direction: Direction) -> Option<usize> {
        find_window(haystack, &self.words, direction)
    }

    /// Byte offset of the first word-aligned match in a byte buffer.
    ///
    /// Words are decoded in place, so the buffer is never copied.
    pub fn scan_bytes(&self, bytes: &[u8], direction: Direction) -> Option<usize> {
        let word_count = bytes.len() / module_params::WORD;
        let candidates = word_count.checked_sub(self.words.len())? + 1;
        let matches_at = |start: &usize| {
            self.words
                .iter()
                .enumerate()
                .all(|(i, &word)| read_u32(bytes, (start + i) * module_params::WORD) == word)
        };

        let mut starts = 0..candidates;
        let found = match direction {
            Direction::Forward => starts.find(matches_at),
            Direction::Backward => starts.rfind(matches_at),
        };
        found.map(|index| index * module_params::WORD)
    }
}

impl FromStr for WordSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_signature(s)
    }
}

impl fmt::Display for WordSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_signature(&self.words))
    }
}

/// Parse whitespace-separated hex words, e.g. `"DEC00621 0x2106C0DE"`
pub fn parse_signature(text: &str) -> Result<WordSignature> {
    let mut words = Vec::new();
    for token in text.split_whitespace() {
        let digits = token.trim_start_matches("0x").trim_start_matches("0X");
        let value = u32::from_str_radix(digits, 16).map_err(|e| {
            Error::InvalidSignature(format!("Invalid signature word '{}': {}", token, e))
        })?;
        words.push(value);
    }

    if words.is_empty() {
        return Err(Error::InvalidSignature(
            "Signature pattern is empty".to_string(),
        ));
    }

    WordSignature::new(words)
}

pub fn format_signature(words: &[u32]) -> String {
    words
        .iter()
        .map(|w| format!("{:08X}", w))
        .collect::<Vec<_>>()
        .join(" ")
}
