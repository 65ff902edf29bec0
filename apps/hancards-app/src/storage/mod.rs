//! Persistence of packs and scores.

mod error;
mod json;
mod memory;

pub use error::StorageError;
pub use json::JsonFileRepository;
pub use memory::MemoryRepository;

use chrono::{DateTime, Utc};
use hancards_core::{Pack, ScoreTable};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Current on-disk document version.
pub const DATA_VERSION: u32 = 1;

/// Everything the app keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredData {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub packs: Vec<Pack>,
    #[serde(default)]
    pub scores: ScoreTable,
}

fn default_version() -> u32 {
    DATA_VERSION
}

impl StoredData {
    pub fn new(packs: &[Pack], scores: &ScoreTable) -> Self {
        Self {
            version: DATA_VERSION,
            saved_at: Some(Utc::now()),
            packs: packs.to_vec(),
            scores: scores.clone(),
        }
    }
}

/// Repository for packs and scores.
pub trait PackRepository: Send {
    /// Load stored data; a repository with nothing saved yields empty data.
    fn load(&self) -> Result<StoredData>;

    /// Replace stored data with the given packs and scores.
    fn persist(&self, packs: &[Pack], scores: &ScoreTable) -> Result<()>;
}
