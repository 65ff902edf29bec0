//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported data file version {0}")]
    UnsupportedVersion(u32),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
