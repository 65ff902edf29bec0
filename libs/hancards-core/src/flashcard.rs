//! Flashcard study session: show prompt, optionally reveal, advance.

use crate::config::StudySettings;
use crate::score::{ScoreEvent, ScoreTable};
use crate::selector::select_next;
use crate::types::{PromptDirection, Word};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardState {
    /// No active words.
    Idle,
    ShowingPrompt,
    ShowingAnswer,
}

/// Score change applied when a card was advanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOutcome {
    pub key: String,
    pub event: ScoreEvent,
    pub score: u8,
}

/// One learner's pass over the active word set.
#[derive(Debug)]
pub struct FlashcardSession<R = StdRng> {
    words: Vec<Word>,
    current: Option<usize>,
    last_index: Option<usize>,
    state: FlashcardState,
    revealed: bool,
    direction: PromptDirection,
    settings: StudySettings,
    rng: R,
}

impl FlashcardSession<StdRng> {
    pub fn new(settings: StudySettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> FlashcardSession<R> {
    pub fn with_rng(settings: StudySettings, rng: R) -> Self {
        Self {
            words: Vec::new(),
            current: None,
            last_index: None,
            state: FlashcardState::Idle,
            revealed: false,
            direction: PromptDirection::default(),
            settings,
            rng,
        }
    }

    /// Load a word set and pick the first card from scratch.
    pub fn load(&mut self, words: Vec<Word>, scores: &ScoreTable) {
        self.words = words;
        self.last_index = None;
        self.revealed = false;
        self.current = self.pick(scores);
        self.state = if self.current.is_some() {
            FlashcardState::ShowingPrompt
        } else {
            FlashcardState::Idle
        };
        tracing::debug!(words = self.words.len(), current = ?self.current, "flashcards loaded");
    }

    /// Replace the active set after packs changed. Scores are kept.
    pub fn replace_words(&mut self, words: Vec<Word>, scores: &ScoreTable) {
        self.load(words, scores);
    }

    /// Toggle between prompt and answer. Showing the answer marks the card
    /// as revealed until the next advance.
    pub fn reveal(&mut self) {
        match self.state {
            FlashcardState::Idle => {}
            FlashcardState::ShowingPrompt => {
                self.revealed = true;
                self.state = FlashcardState::ShowingAnswer;
            }
            FlashcardState::ShowingAnswer => {
                self.state = FlashcardState::ShowingPrompt;
            }
        }
    }

    /// Score the current card and move to the next one.
    ///
    /// Returns the applied score change, or `None` when there was no card.
    pub fn advance(&mut self, scores: &mut ScoreTable) -> Option<CardOutcome> {
        let Some(current) = self.current else {
            self.state = FlashcardState::Idle;
            return None;
        };
        let key = self.words[current].key().to_string();

        let event = if self.revealed {
            ScoreEvent::Flipped
        } else {
            ScoreEvent::Skipped
        };
        let score = scores.apply(&key, event, &self.settings.scoring);

        self.last_index = Some(current);
        self.revealed = false;
        self.current = self.pick(scores);
        self.state = if self.current.is_some() {
            FlashcardState::ShowingPrompt
        } else {
            FlashcardState::Idle
        };

        Some(CardOutcome { key, event, score })
    }

    /// Swap which field is the prompt. Not a reveal.
    pub fn set_direction(&mut self, direction: PromptDirection) {
        self.direction = direction;
    }

    fn pick(&mut self, scores: &ScoreTable) -> Option<usize> {
        select_next(
            &self.words,
            scores,
            self.last_index,
            &self.settings.scoring,
            &self.settings.selector,
            &mut self.rng,
        )
    }

    pub fn state(&self) -> FlashcardState {
        self.state
    }

    pub fn direction(&self) -> PromptDirection {
        self.direction
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current.and_then(|i| self.words.get(i))
    }

    pub fn prompt_text(&self) -> Option<&str> {
        self.current_word()
            .map(|w| w.text(self.direction.prompt_field()))
    }

    pub fn answer_text(&self) -> Option<&str> {
        self.current_word()
            .map(|w| w.text(self.direction.answer_field()))
    }

    /// Text currently face-up on the card.
    pub fn visible_text(&self) -> Option<&str> {
        match self.state {
            FlashcardState::Idle => None,
            FlashcardState::ShowingPrompt => self.prompt_text(),
            FlashcardState::ShowingAnswer => self.answer_text(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand_chacha::ChaCha8Rng;

    fn session() -> FlashcardSession<ChaCha8Rng> {
        FlashcardSession::with_rng(StudySettings::default(), ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn empty_set_is_idle() {
        let mut s = session();
        let mut scores = ScoreTable::new();
        s.load(vec![], &scores);
        assert_eq!(s.state(), FlashcardState::Idle);
        s.reveal();
        assert_eq!(s.state(), FlashcardState::Idle);
        assert_eq!(s.advance(&mut scores), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn reveal_then_advance_clamps_at_zero_and_skip_adds_bonus() {
        let mut s = session();
        let mut scores = ScoreTable::new();
        s.load(vec![Word::new("학기", "semester")], &scores);
        assert_eq!(s.state(), FlashcardState::ShowingPrompt);

        s.reveal();
        assert_eq!(s.state(), FlashcardState::ShowingAnswer);
        let outcome = s.advance(&mut scores).unwrap();
        assert_eq!(outcome.event, ScoreEvent::Flipped);
        assert_eq!(outcome.score, 0);
        assert_eq!(s.state(), FlashcardState::ShowingPrompt);
        assert!(!s.is_revealed());

        let outcome = s.advance(&mut scores).unwrap();
        assert_eq!(
            outcome,
            CardOutcome {
                key: "학기".into(),
                event: ScoreEvent::Skipped,
                score: 5,
            }
        );
    }

    #[test]
    fn hiding_answer_again_still_counts_as_revealed() {
        let mut s = session();
        let mut scores = ScoreTable::new();
        scores.set("학기", 50, &StudySettings::default().scoring);
        s.load(vec![Word::new("학기", "semester")], &scores);

        s.reveal();
        s.reveal();
        assert_eq!(s.state(), FlashcardState::ShowingPrompt);
        assert!(s.is_revealed());
        assert_eq!(s.advance(&mut scores).unwrap().score, 30);
    }

    #[test]
    fn direction_changes_display_only() {
        let mut s = session();
        let scores = ScoreTable::new();
        s.load(vec![Word::new("학기", "semester")], &scores);

        assert_eq!(s.prompt_text(), Some("semester"));
        s.set_direction(PromptDirection::KoreanFirst);
        assert_eq!(s.prompt_text(), Some("학기"));
        assert_eq!(s.answer_text(), Some("semester"));
        assert_eq!(s.state(), FlashcardState::ShowingPrompt);
        assert!(!s.is_revealed());

        s.reveal();
        assert_eq!(s.visible_text(), Some("semester"));
    }

    #[test]
    fn advance_avoids_immediate_repeat_mostly() {
        let mut s = session();
        let mut scores = ScoreTable::new();
        let words: Vec<Word> = (0..3).map(|i| Word::new(format!("k{i}"), format!("e{i}"))).collect();
        s.load(words, &scores);

        let mut repeats = 0;
        let mut prev = s.current_index();
        for _ in 0..500 {
            s.advance(&mut scores);
            if s.current_index() == prev {
                repeats += 1;
            }
            prev = s.current_index();
        }
        assert!(repeats < 75, "repeats {repeats}");
    }

    #[test]
    fn replacing_words_keeps_scores() {
        let mut s = session();
        let mut scores = ScoreTable::new();
        s.load(vec![Word::new("학기", "semester")], &scores);
        s.advance(&mut scores);
        assert_eq!(scores.entry("학기"), Some(5));

        s.replace_words(vec![], &scores);
        assert_eq!(s.state(), FlashcardState::Idle);
        assert_eq!(s.current_word(), None);
        assert_eq!(scores.entry("학기"), Some(5));

        s.replace_words(vec![Word::new("학기", "semester")], &scores);
        assert_eq!(s.state(), FlashcardState::ShowingPrompt);
    }
}
