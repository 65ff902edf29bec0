//! JSON file repository with atomic replacement.

use super::{PackRepository, Result, StorageError, StoredData, DATA_VERSION};
use hancards_core::{Pack, ScoreTable};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores everything in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PackRepository for JsonFileRepository {
    fn load(&self) -> Result<StoredData> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(StoredData::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let data: StoredData = serde_json::from_str(&content)?;
        if data.version > DATA_VERSION {
            return Err(StorageError::UnsupportedVersion(data.version));
        }
        tracing::info!(
            path = %self.path.display(),
            packs = data.packs.len(),
            scores = data.scores.len(),
            "loaded data file"
        );
        Ok(data)
    }

    fn persist(&self, packs: &[Pack], scores: &ScoreTable) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // Write next to the target so the final rename stays on one filesystem.
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &StoredData::new(packs, scores))?;
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), "data file saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hancards_core::{ScoringConfig, Word};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_pack() -> Pack {
        Pack {
            id: "pack-1".into(),
            name: "B1".into(),
            category: "TC3".into(),
            words: vec![Word::new("학기", "semester")],
            enabled: true,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("hancards.json"));
        let data = repo.load().unwrap();
        assert!(data.packs.is_empty());
        assert!(data.scores.is_empty());
    }

    #[test]
    fn persist_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("nested").join("hancards.json"));
        let mut scores = ScoreTable::new();
        scores.set("학기", 30, &ScoringConfig::default());

        repo.persist(&[sample_pack()], &scores).unwrap();
        let data = repo.load().unwrap();

        assert_eq!(data.packs, vec![sample_pack()]);
        assert_eq!(data.scores, scores);
        assert_eq!(data.version, DATA_VERSION);
        assert!(data.saved_at.is_some());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hancards.json");
        fs::write(&path, "{ not json").unwrap();
        let repo = JsonFileRepository::open(&path);
        assert!(matches!(repo.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn newer_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hancards.json");
        fs::write(&path, r#"{"version": 99, "packs": [], "scores": {}}"#).unwrap();
        let repo = JsonFileRepository::open(&path);
        assert!(matches!(repo.load(), Err(StorageError::UnsupportedVersion(99))));
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hancards.json");
        fs::write(
            &path,
            r#"{"packs": [{"id": "p", "name": "n", "words": [{"korean": "학기", "english": "semester"}]}]}"#,
        )
        .unwrap();
        let data = JsonFileRepository::open(&path).load().unwrap();
        assert_eq!(data.packs[0].category, "");
        assert!(!data.packs[0].enabled);
        assert!(data.scores.is_empty());
    }
}
