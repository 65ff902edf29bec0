//! Read-only snapshot of the app for a presentation layer.

use crate::state::StudyApp;
use hancards_core::{
    FlashcardState, ImportSummary, MasteryBand, PromptDirection, QuizMode, QuizState,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudyView {
    pub flashcard: FlashcardView,
    pub quiz: QuizView,
    pub stats: StatsView,
    pub categories: Vec<CategoryView>,
    pub last_import: Option<ImportSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashcardView {
    pub state: FlashcardState,
    pub direction: PromptDirection,
    pub prompt: Option<String>,
    pub answer: Option<String>,
    /// Text on the visible face of the card.
    pub visible: Option<String>,
    pub revealed: bool,
    pub score: Option<u8>,
    pub band: Option<MasteryBand>,
}

impl Default for FlashcardView {
    fn default() -> Self {
        Self {
            state: FlashcardState::Idle,
            direction: PromptDirection::default(),
            prompt: None,
            answer: None,
            visible: None,
            revealed: false,
            score: None,
            band: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub state: QuizState,
    pub mode: QuizMode,
    pub prompt: Option<String>,
    pub options: Vec<QuizOptionView>,
    pub selected: Option<usize>,
    /// Only known once the question is answered.
    pub correct_index: Option<usize>,
    pub score: Option<u8>,
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            state: QuizState::Idle,
            mode: QuizMode::default(),
            prompt: None,
            options: Vec::new(),
            selected: None,
            correct_index: None,
            score: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOptionView {
    pub text: String,
    /// The option's word in the prompt language. Filled once answered, for
    /// the correct option and the one picked.
    pub translation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsView {
    pub word_count: usize,
    pub enabled_packs: usize,
    pub average_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub all_enabled: bool,
    pub packs: Vec<PackView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackView {
    pub id: String,
    pub name: String,
    pub word_count: usize,
    pub enabled: bool,
}

impl StudyView {
    pub fn capture(app: &StudyApp) -> Self {
        let scoring = &app.settings().scoring;
        let scores = app.scores();

        let cards = app.flashcards();
        let card_word = cards.current_word();
        let flashcard = FlashcardView {
            state: cards.state(),
            direction: cards.direction(),
            prompt: cards.prompt_text().map(str::to_string),
            answer: cards.answer_text().map(str::to_string),
            visible: cards.visible_text().map(str::to_string),
            revealed: cards.is_revealed(),
            score: card_word.map(|w| scores.get(w.key(), scoring)),
            band: card_word.map(|w| scores.band(w.key(), scoring)),
        };

        let quiz = app.quiz();
        let question = quiz.question();
        let answered = question.filter(|_| quiz.is_answered());
        let options = quiz
            .options()
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let translation = answered
                    .filter(|q| idx == q.correct_index || Some(idx) == quiz.selected())
                    .and_then(|q| {
                        quiz.words()
                            .iter()
                            .find(|w| w.korean == option.korean)
                            .map(|w| w.text(q.direction.prompt).to_string())
                    });
                QuizOptionView {
                    text: option.text.clone(),
                    translation,
                }
            })
            .collect();
        let quiz = QuizView {
            state: quiz.state(),
            mode: quiz.mode(),
            prompt: question.map(|q| q.prompt().to_string()),
            options,
            selected: quiz.selected(),
            correct_index: answered.map(|q| q.correct_index),
            score: question.map(|q| scores.get(q.word.key(), scoring)),
        };

        let words = app.flashcards().words();
        let stats = StatsView {
            word_count: words.len(),
            enabled_packs: app.library().enabled_count(),
            average_score: scores.average(words, scoring),
        };

        let categories = app
            .library()
            .categories()
            .into_iter()
            .map(|group| CategoryView {
                name: group.category.to_string(),
                all_enabled: group.all_enabled(),
                packs: group
                    .packs
                    .iter()
                    .map(|pack| PackView {
                        id: pack.id.clone(),
                        name: pack.name.clone(),
                        word_count: pack.words.len(),
                        enabled: pack.enabled,
                    })
                    .collect(),
            })
            .collect();

        Self {
            flashcard,
            quiz,
            stats,
            categories,
            last_import: app.last_import,
        }
    }
}
