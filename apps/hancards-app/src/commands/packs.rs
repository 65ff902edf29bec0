//! Pack management commands.

use super::CommandError;
use crate::state::StudyApp;
use hancards_core::{Change, Word};

/// Enable or disable a pack. Returns the new flag.
pub fn toggle_pack(app: &mut StudyApp, id: &str) -> Result<bool, CommandError> {
    let enabled = app.library.toggle_pack(id)?;
    app.commit(Change::ActiveWords);
    Ok(enabled)
}

/// Enable a whole category, or disable it if fully enabled.
pub fn toggle_category(app: &mut StudyApp, category: &str) -> Result<bool, CommandError> {
    let enabled = app.library.toggle_category(category).ok_or_else(|| CommandError {
        message: format!("category not found: {category}"),
    })?;
    app.commit(Change::ActiveWords);
    Ok(enabled)
}

/// Create an empty pack. Returns its id.
pub fn add_pack(app: &mut StudyApp, name: &str, category: &str) -> Result<String, CommandError> {
    let id = app.library.add_pack(name, category)?;
    app.commit(Change::Packs);
    Ok(id)
}

pub fn rename_pack(app: &mut StudyApp, id: &str, name: &str) -> Result<(), CommandError> {
    app.library.rename_pack(id, name)?;
    app.commit(Change::Packs);
    Ok(())
}

pub fn delete_pack(app: &mut StudyApp, id: &str) -> Result<(), CommandError> {
    let change = app.library.delete_pack(id)?;
    app.commit(change);
    Ok(())
}

/// Delete every pack in a category. Returns how many were removed.
pub fn delete_category(app: &mut StudyApp, category: &str) -> usize {
    let removed = app.library.delete_category(category);
    if removed > 0 {
        app.commit(Change::ActiveWords);
    }
    removed
}

pub fn delete_all_packs(app: &mut StudyApp) {
    app.library.clear();
    app.commit(Change::ActiveWords);
}

/// Add a word, or replace the word at `edit_index`.
pub fn save_word(
    app: &mut StudyApp,
    pack_id: &str,
    edit_index: Option<usize>,
    word: Word,
) -> Result<(), CommandError> {
    let change = app.library.save_word(pack_id, edit_index, word)?;
    app.commit(change);
    Ok(())
}

pub fn remove_word(app: &mut StudyApp, pack_id: &str, index: usize) -> Result<(), CommandError> {
    let change = app.library.remove_word(pack_id, index)?;
    app.commit(change);
    Ok(())
}
