//! Host configuration from the environment.
//!
//! Recognised variables:
//! - `HANCARDS_DATA_DIR`: directory holding `hancards.json`
//!   (default: the platform's local data dir + `hancards`)
//! - `HANCARDS_SETTINGS`: optional JSON file overriding engine settings
//! - `RUST_LOG`: tracing filter (default `info`)

use anyhow::Context;
use hancards_core::StudySettings;
use std::path::PathBuf;

pub const DATA_FILE: &str = "hancards.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub settings: StudySettings,
    pub log_filter: String,
}

impl AppConfig {
    /// Read configuration from process environment (after `.env`).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("HANCARDS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let settings: StudySettings = match lookup("HANCARDS_SETTINGS") {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading settings file {path}"))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing settings file {path}"))?
            }
            None => StudySettings::default(),
        };

        settings
            .validate()
            .context("invalid engine settings")?;

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            data_dir,
            settings,
            log_filter,
        })
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hancards")
}
