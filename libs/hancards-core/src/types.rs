//! Core types for the vocabulary study engine.

use serde::{Deserialize, Serialize};

/// A single vocabulary entry. `korean` is the identity key used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub korean: String,
    pub english: String,
}

impl Word {
    pub fn new(korean: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            korean: korean.into(),
            english: english.into(),
        }
    }

    /// Identity key shared with the score table.
    pub fn key(&self) -> &str {
        &self.korean
    }

    /// Text of the given field.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Korean => &self.korean,
            Field::English => &self.english,
        }
    }

    /// Both fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.korean.trim().is_empty() && !self.english.trim().is_empty()
    }
}

/// Which side of a word is used as prompt or answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Korean,
    English,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Self::Korean => Self::English,
            Self::English => Self::Korean,
        }
    }
}

/// Named, categorized collection of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub enabled: bool,
}

impl Pack {
    /// Category label used for grouping; empty categories group together.
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}

/// Label for packs imported without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Prompt direction for flashcard mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptDirection {
    /// Show English, recall Korean.
    EnglishFirst,
    /// Show Korean, recall English.
    KoreanFirst,
}

impl Default for PromptDirection {
    fn default() -> Self {
        Self::EnglishFirst
    }
}

impl PromptDirection {
    pub fn prompt_field(self) -> Field {
        match self {
            Self::EnglishFirst => Field::English,
            Self::KoreanFirst => Field::Korean,
        }
    }

    pub fn answer_field(self) -> Field {
        self.prompt_field().other()
    }
}

/// Question direction for quiz mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Direction drawn 50/50 per question.
    Mixed,
    /// Prompt English, answer Korean.
    ToKorean,
    /// Prompt Korean, answer English.
    FromKorean,
}

impl Default for QuizMode {
    fn default() -> Self {
        Self::Mixed
    }
}

/// Concrete prompt/answer field pair for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub prompt: Field,
    pub answer: Field,
}

impl Direction {
    pub const TO_KOREAN: Self = Self {
        prompt: Field::English,
        answer: Field::Korean,
    };

    pub const FROM_KOREAN: Self = Self {
        prompt: Field::Korean,
        answer: Field::English,
    };
}

/// Mastery classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryBand {
    Learning,
    Familiar,
    Mastered,
}

impl MasteryBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=33 => Self::Learning,
            34..=66 => Self::Familiar,
            _ => Self::Mastered,
        }
    }
}
