//! Per-word mastery scores and their update rules.

use crate::config::ScoringConfig;
use crate::types::{MasteryBand, Word};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Learner outcome that moves a word's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreEvent {
    /// Answer revealed before advancing the flashcard.
    Flipped,
    /// Flashcard advanced without revealing.
    Skipped,
    QuizCorrect,
    QuizIncorrect,
}

impl ScoreEvent {
    pub fn from_quiz_answer(correct: bool) -> Self {
        if correct {
            Self::QuizCorrect
        } else {
            Self::QuizIncorrect
        }
    }

    /// Signed score change for this event.
    pub fn delta(self, config: &ScoringConfig) -> i32 {
        match self {
            Self::Flipped => -i32::from(config.flip_penalty),
            Self::Skipped => i32::from(config.skip_bonus),
            Self::QuizCorrect => i32::from(config.quiz_bonus),
            Self::QuizIncorrect => -i32::from(config.quiz_penalty),
        }
    }
}

/// Mapping from word key to score. Entries are created on first update and
/// never removed; missing keys read as the default score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    scores: HashMap<String, u8>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score for `key`, falling back to the configured default.
    pub fn get(&self, key: &str, config: &ScoringConfig) -> u8 {
        self.scores
            .get(key)
            .copied()
            .map(|s| config.clamp(i32::from(s)))
            .unwrap_or_else(|| config.initial_score())
    }

    /// Raw stored entry, if any.
    pub fn entry(&self, key: &str) -> Option<u8> {
        self.scores.get(key).copied()
    }

    /// Apply an event to `key` and return the clamped new score.
    pub fn apply(&mut self, key: &str, event: ScoreEvent, config: &ScoringConfig) -> u8 {
        let old = self.get(key, config);
        let new = config.clamp(i32::from(old) + event.delta(config));
        self.scores.insert(key.to_string(), new);
        tracing::debug!(key, ?event, old, new, "score updated");
        new
    }

    /// Overwrite a score, clamped.
    pub fn set(&mut self, key: &str, score: i32, config: &ScoringConfig) {
        self.scores.insert(key.to_string(), config.clamp(score));
    }

    /// Rounded mean score over `words`; 0 for an empty list.
    pub fn average(&self, words: &[Word], config: &ScoringConfig) -> u8 {
        if words.is_empty() {
            return 0;
        }
        let total: u32 = words.iter().map(|w| u32::from(self.get(w.key(), config))).sum();
        (f64::from(total) / words.len() as f64).round() as u8
    }

    pub fn band(&self, key: &str, config: &ScoringConfig) -> MasteryBand {
        MasteryBand::from_score(self.get(key, config))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(String, u8)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}
