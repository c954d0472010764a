use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid pattern length: signature must contain at least one word")]
    EmptyPattern,

    #[error("Invalid scan direction: step {0} (expected 1 or -1)")]
    InvalidDirection(i32),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Short read while reading {what}: expected {expected} bytes, got {actual}")]
    ShortRead {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid banner: {0}")]
    InvalidBanner(String),

    #[error("Icon slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error means the image ended before a structure did
    pub fn is_truncated(&self) -> bool {
        match self {
            Error::ShortRead { .. } => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}
