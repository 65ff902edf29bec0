//! Commands invoked by the input layer.

pub mod packs;
pub mod quiz;
pub mod study;
pub mod transfer;

use crate::events::InputEvent;
use crate::state::StudyApp;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<hancards_core::LibraryError> for CommandError {
    fn from(e: hancards_core::LibraryError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<hancards_core::ImportError> for CommandError {
    fn from(e: hancards_core::ImportError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<hancards_core::ExportError> for CommandError {
    fn from(e: hancards_core::ExportError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<crate::storage::StorageError> for CommandError {
    fn from(e: crate::storage::StorageError) -> Self {
        Self { message: e.to_string() }
    }
}

/// Route one input event to its command.
pub fn dispatch(app: &mut StudyApp, event: InputEvent) -> Result<(), CommandError> {
    match event {
        InputEvent::Reveal => study::reveal(app),
        InputEvent::Advance => {
            study::advance(app);
        }
        InputEvent::SetDirection(direction) => study::set_direction(app, direction),
        InputEvent::SelectOption(index) => {
            quiz::select_option(app, index);
        }
        InputEvent::NextQuestion => quiz::next_question(app),
        InputEvent::SetQuizMode(mode) => quiz::set_quiz_mode(app, mode),
        InputEvent::TogglePack { id } => {
            packs::toggle_pack(app, &id)?;
        }
        InputEvent::ToggleCategory { category } => {
            packs::toggle_category(app, &category)?;
        }
        InputEvent::AddPack { name, category } => {
            packs::add_pack(app, &name, &category)?;
        }
        InputEvent::RenamePack { id, name } => packs::rename_pack(app, &id, &name)?,
        InputEvent::DeletePack { id } => packs::delete_pack(app, &id)?,
        InputEvent::DeleteCategory { category } => {
            packs::delete_category(app, &category);
        }
        InputEvent::DeleteAllPacks => packs::delete_all_packs(app),
        InputEvent::SaveWord {
            pack_id,
            edit_index,
            word,
        } => packs::save_word(app, &pack_id, edit_index, word)?,
        InputEvent::RemoveWord { pack_id, index } => packs::remove_word(app, &pack_id, index)?,
        InputEvent::ImportCsv { text } => {
            transfer::import_csv(app, &text)?;
        }
        InputEvent::Shutdown => {}
    }
    Ok(())
}
