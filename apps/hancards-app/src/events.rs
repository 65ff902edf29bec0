//! Input events and the single-threaded event loop.

use crate::state::StudyApp;
use crate::view::StudyView;
use hancards_core::{AdvanceTicket, PromptDirection, QuizMode, Word};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

/// Everything the input layer can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InputEvent {
    Reveal,
    Advance,
    SetDirection(PromptDirection),
    SelectOption(usize),
    NextQuestion,
    SetQuizMode(QuizMode),
    TogglePack {
        id: String,
    },
    ToggleCategory {
        category: String,
    },
    AddPack {
        name: String,
        #[serde(default)]
        category: String,
    },
    RenamePack {
        id: String,
        name: String,
    },
    DeletePack {
        id: String,
    },
    DeleteCategory {
        category: String,
    },
    DeleteAllPacks,
    SaveWord {
        pack_id: String,
        #[serde(default)]
        edit_index: Option<usize>,
        word: Word,
    },
    RemoveWord {
        pack_id: String,
        index: usize,
    },
    ImportCsv {
        text: String,
    },
    Shutdown,
}

/// Drive the app until `Shutdown` arrives or the input channel closes.
///
/// Input events and fired auto-advance tickets are handled one at a time;
/// a fresh [`StudyView`] is published after each.
pub async fn run_event_loop(
    app: &mut StudyApp,
    mut input: mpsc::Receiver<InputEvent>,
    mut tickets: mpsc::UnboundedReceiver<AdvanceTicket>,
    view: watch::Sender<StudyView>,
) {
    view.send_replace(app.view());

    loop {
        tokio::select! {
            event = input.recv() => {
                let Some(event) = event else {
                    tracing::info!("input closed");
                    break;
                };
                if event == InputEvent::Shutdown {
                    tracing::info!("shutdown requested");
                    break;
                }
                if let Err(err) = app.handle(event) {
                    tracing::warn!(error = %err, "command failed");
                }
            }
            Some(ticket) = tickets.recv() => {
                if !app.on_advance_due(ticket) {
                    tracing::debug!(?ticket, "stale advance ticket");
                }
            }
        }
        view.send_replace(app.view());
    }
}
