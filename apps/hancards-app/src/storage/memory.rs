//! In-memory repository (for testing and ephemeral sessions).

use super::{PackRepository, Result, StorageError, StoredData};
use hancards_core::{Pack, ScoreTable};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shares its contents between clones, so a test can keep a handle while the
/// app owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    data: Arc<Mutex<StoredData>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: StoredData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            ..Self::default()
        }
    }

    /// Snapshot of the stored data.
    pub fn snapshot(&self) -> StoredData {
        self.data.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Number of successful persists.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent persists fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl PackRepository for MemoryRepository {
    fn load(&self) -> Result<StoredData> {
        self.data
            .lock()
            .map(|d| d.clone())
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn persist(&self, packs: &[Pack], scores: &ScoreTable) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *data = StoredData::new(packs, scores);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
