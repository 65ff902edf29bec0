//! Tunable constants for scoring, selection and quiz pacing.
//!
//! Every struct deserializes with defaults so a settings file only needs the
//! fields it overrides.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Score update constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Starting score for a word that has never been scored.
    pub default_score: u8,
    /// Added when a card is advanced without revealing the answer.
    pub skip_bonus: u8,
    /// Subtracted when the answer was revealed before advancing.
    pub flip_penalty: u8,
    /// Added for a correct quiz answer.
    pub quiz_bonus: u8,
    /// Subtracted for a wrong quiz answer.
    pub quiz_penalty: u8,
    pub min: u8,
    pub max: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_score: 0,
            skip_bonus: 5,
            flip_penalty: 20,
            quiz_bonus: 10,
            quiz_penalty: 10,
            min: 0,
            max: 100,
        }
    }
}

impl ScoringConfig {
    /// Clamp a raw score into `[min, max]`. Never panics, even on inverted
    /// bounds; [`StudySettings::validate`] rejects those up front.
    pub fn clamp(&self, score: i32) -> u8 {
        score.max(i32::from(self.min)).min(i32::from(self.max)) as u8
    }

    /// Starting score, clamped into `[min, max]`.
    pub fn initial_score(&self) -> u8 {
        self.clamp(i32::from(self.default_score))
    }

    /// Weighting ceiling: one above the maximum score.
    pub fn ceiling(&self) -> f64 {
        f64::from(self.max) + 1.0
    }
}

/// Weighted selector constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Multiplier applied to the weight of the previously shown word.
    pub recency_factor: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            recency_factor: 0.1,
        }
    }
}

/// Quiz pacing and option counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub correct_delay_ms: u64,
    pub incorrect_delay_ms: u64,
    pub distractor_count: usize,
    /// Attempts at drawing a target different from the previous one.
    pub max_retries: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            correct_delay_ms: 2500,
            incorrect_delay_ms: 4000,
            distractor_count: 3,
            max_retries: 20,
        }
    }
}

impl QuizConfig {
    /// Auto-advance delay after an answer.
    pub fn advance_delay(&self, correct: bool) -> Duration {
        if correct {
            Duration::from_millis(self.correct_delay_ms)
        } else {
            Duration::from_millis(self.incorrect_delay_ms)
        }
    }
}

/// All engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudySettings {
    pub scoring: ScoringConfig,
    pub selector: SelectorConfig,
    pub quiz: QuizConfig,
}

impl StudySettings {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let ScoringConfig { min, max, .. } = self.scoring;
        if min > max {
            return Err(SettingsError::InvertedBounds { min, max });
        }
        let factor = self.selector.recency_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SettingsError::InvalidRecencyFactor(factor));
        }
        Ok(())
    }
}
