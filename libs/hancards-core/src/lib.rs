//! Core study engine for HanCards vocabulary packs.
//!
//! Provides:
//! - Weighted next-card selection biased toward low-mastery words
//! - Per-word mastery scores with flashcard and quiz update rules
//! - Flashcard session and multiple-choice quiz state machines
//! - Length-weighted distractor generation
//! - Pack library, CSV import/export
//! - Cancellable auto-advance scheduling

pub mod config;
pub mod csv;
pub mod distractor;
pub mod error;
pub mod flashcard;
pub mod library;
pub mod quiz;
pub mod sampling;
pub mod scheduler;
pub mod score;
pub mod selector;
pub mod types;

pub use config::{QuizConfig, ScoringConfig, SelectorConfig, StudySettings};
pub use crate::csv::{CsvRow, PackDraft, ParseReport};
pub use distractor::pick_distractors;
pub use error::{ExportError, ImportError, LibraryError, Result, SettingsError};
pub use flashcard::{CardOutcome, FlashcardSession, FlashcardState};
pub use library::{CategoryGroup, Change, ImportSummary, PackLibrary};
pub use quiz::{AnswerOutcome, Question, QuizEngine, QuizOption, QuizState};
pub use scheduler::{AdvanceScheduler, AdvanceTicket, ManualScheduler, PendingAdvance, TokioScheduler};
pub use score::{ScoreEvent, ScoreTable};
pub use selector::select_next;
pub use types::{Direction, Field, MasteryBand, Pack, PromptDirection, QuizMode, Word};
