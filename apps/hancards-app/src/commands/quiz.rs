//! Quiz commands.

use crate::state::StudyApp;
use hancards_core::{AnswerOutcome, QuizMode};

/// Answer the current question, or skip the wait if already answered.
pub fn select_option(app: &mut StudyApp, index: usize) -> Option<AnswerOutcome> {
    let outcome = app.quiz.select(index, &mut app.scores)?;
    tracing::debug!(
        key = %outcome.key,
        correct = outcome.correct,
        score = outcome.score,
        "quiz answered"
    );
    app.persist();
    Some(outcome)
}

pub fn next_question(app: &mut StudyApp) {
    app.quiz.next_question();
}

pub fn set_quiz_mode(app: &mut StudyApp, mode: QuizMode) {
    app.quiz.set_mode(mode);
}
