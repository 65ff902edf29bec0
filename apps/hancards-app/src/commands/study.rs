//! Flashcard commands.

use crate::state::StudyApp;
use hancards_core::{CardOutcome, PromptDirection};

/// Flip the current card.
pub fn reveal(app: &mut StudyApp) {
    app.flashcards.reveal();
}

/// Score the current card and show the next one.
pub fn advance(app: &mut StudyApp) -> Option<CardOutcome> {
    let outcome = app.flashcards.advance(&mut app.scores)?;
    tracing::debug!(key = %outcome.key, event = ?outcome.event, score = outcome.score, "card advanced");
    app.persist();
    Some(outcome)
}

pub fn set_direction(app: &mut StudyApp, direction: PromptDirection) {
    app.flashcards.set_direction(direction);
}
