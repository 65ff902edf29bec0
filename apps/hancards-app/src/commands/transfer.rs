//! CSV import and export commands.

use super::CommandError;
use crate::state::StudyApp;
use hancards_core::{csv, ImportSummary};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportResult {
    pub summary: ImportSummary,
    /// Data lines dropped for missing fields or an unbalanced quote.
    pub skipped: usize,
}

/// Import CSV text into the library.
pub fn import_csv(app: &mut StudyApp, text: &str) -> Result<ImportResult, CommandError> {
    let (drafts, skipped) = csv::parse_packs(text)?;
    let (summary, change) = app.library.import(drafts);
    app.last_import = Some(summary);
    app.commit(change);
    Ok(ImportResult { summary, skipped })
}

/// Import a CSV file from disk.
pub fn import_file(app: &mut StudyApp, path: &Path) -> Result<ImportResult, CommandError> {
    let text = fs::read_to_string(path).map_err(|e| CommandError {
        message: format!("{}: {e}", path.display()),
    })?;
    import_csv(app, &text)
}

/// All packs as four-column CSV.
pub fn export_csv(app: &StudyApp) -> Result<String, CommandError> {
    Ok(csv::export(app.library.packs())?)
}

/// Prompt text for converting raw study material into importable CSV.
pub fn conversion_prompt(material: &str) -> Result<String, CommandError> {
    csv::conversion_prompt(material).ok_or_else(|| CommandError {
        message: "study material is empty".to_string(),
    })
}
