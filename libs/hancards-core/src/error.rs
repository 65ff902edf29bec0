//! Error types for hancards-core.

use thiserror::Error;

/// Errors that can occur while parsing CSV word lists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("empty input")]
    EmptyInput,

    #[error("no valid rows found")]
    NoValidRows,
}

/// Errors that can occur while writing CSV exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Invalid engine settings.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("score bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: u8, max: u8 },

    #[error("recency factor must be a positive finite number, got {0}")]
    InvalidRecencyFactor(f64),
}

/// Errors from pack library mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("pack not found: {0}")]
    PackNotFound(String),

    #[error("word {index} not found in pack {pack_id}")]
    WordNotFound { pack_id: String, index: usize },

    #[error("pack name must not be empty")]
    EmptyName,

    #[error("word needs both a Korean and an English text")]
    InvalidWord,
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
