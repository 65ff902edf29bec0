//! Multiple-choice quiz engine.
//!
//! Questions draw a target uniformly from the active words, avoid repeating
//! the previous target where possible, and surround the correct answer with
//! length-weighted distractors. Answering schedules an auto-advance through
//! an [`AdvanceScheduler`]; every path that produces a new question cancels
//! the outstanding one first, so at most one advance is ever pending.

use crate::config::StudySettings;
use crate::distractor::pick_distractors;
use crate::scheduler::{AdvanceScheduler, AdvanceTicket, PendingAdvance};
use crate::score::{ScoreEvent, ScoreTable};
use crate::types::{Direction, QuizMode, Word};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    /// Fewer than two active words; no question.
    Idle,
    AwaitingAnswer,
    Answered,
}

/// One answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub correct: bool,
    /// Key of the word this option was taken from.
    pub korean: String,
}

/// A generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub word: Word,
    pub direction: Direction,
    pub options: Vec<QuizOption>,
    pub correct_index: usize,
}

impl Question {
    pub fn prompt(&self) -> &str {
        self.word.text(self.direction.prompt)
    }

    pub fn answer(&self) -> &str {
        self.word.text(self.direction.answer)
    }
}

/// Result of answering a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub key: String,
    pub correct: bool,
    pub score: u8,
    pub advance_after: Duration,
}

pub struct QuizEngine<R = StdRng> {
    words: Vec<Word>,
    mode: QuizMode,
    settings: StudySettings,
    state: QuizState,
    question: Option<Question>,
    selected: Option<usize>,
    last_key: Option<String>,
    pending: Option<(AdvanceTicket, Box<dyn PendingAdvance>)>,
    next_ticket: u64,
    scheduler: Box<dyn AdvanceScheduler>,
    rng: R,
}

impl QuizEngine<StdRng> {
    pub fn new(settings: StudySettings, scheduler: Box<dyn AdvanceScheduler>) -> Self {
        Self::with_rng(settings, scheduler, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(settings: StudySettings, scheduler: Box<dyn AdvanceScheduler>, rng: R) -> Self {
        Self {
            words: Vec::new(),
            mode: QuizMode::default(),
            settings,
            state: QuizState::Idle,
            question: None,
            selected: None,
            last_key: None,
            pending: None,
            next_ticket: 0,
            scheduler,
            rng,
        }
    }

    /// Load a word set and generate the first question.
    pub fn load(&mut self, words: Vec<Word>) {
        self.words = words;
        self.next_question();
    }

    /// Replace the active set; any pending advance is dropped.
    pub fn replace_words(&mut self, words: Vec<Word>) {
        self.load(words);
    }

    /// Switch quiz mode and regenerate immediately.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.mode = mode;
        self.next_question();
    }

    /// Generate a new question, cancelling any pending advance.
    pub fn next_question(&mut self) {
        self.cancel_pending();
        self.selected = None;

        if distinct_keys(&self.words) < 2 {
            self.question = None;
            self.state = QuizState::Idle;
            tracing::debug!(words = self.words.len(), "quiz has insufficient words");
            return;
        }

        let direction = self.pick_direction();
        let target = self.pick_target();
        let word = self.words[target].clone();
        self.last_key = Some(word.key().to_string());

        let distractors = pick_distractors(
            &word,
            &self.words,
            direction.answer,
            self.settings.quiz.distractor_count,
            &mut self.rng,
        );

        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(QuizOption {
            text: word.text(direction.answer).to_string(),
            correct: true,
            korean: word.korean.clone(),
        });
        options.extend(distractors.into_iter().map(|d| QuizOption {
            text: d.text(direction.answer).to_string(),
            correct: false,
            korean: d.korean,
        }));
        options.shuffle(&mut self.rng);
        let correct_index = options.iter().position(|o| o.correct).unwrap_or(0);

        tracing::debug!(key = word.key(), options = options.len(), "quiz question generated");
        self.question = Some(Question {
            word,
            direction,
            options,
            correct_index,
        });
        self.state = QuizState::AwaitingAnswer;
    }

    /// Handle a click on option `index`.
    ///
    /// While awaiting an answer this scores the target word and schedules the
    /// auto-advance. Once answered, any click skips the wait.
    pub fn select(&mut self, index: usize, scores: &mut ScoreTable) -> Option<AnswerOutcome> {
        match self.state {
            QuizState::Idle => None,
            QuizState::Answered => {
                self.next_question();
                None
            }
            QuizState::AwaitingAnswer => {
                let question = self.question.as_ref()?;
                let option = question.options.get(index)?;
                let correct = option.correct;
                let key = question.word.key().to_string();

                let score = scores.apply(
                    &key,
                    ScoreEvent::from_quiz_answer(correct),
                    &self.settings.scoring,
                );
                let advance_after = self.settings.quiz.advance_delay(correct);

                self.selected = Some(index);
                self.state = QuizState::Answered;
                self.schedule_advance(advance_after);

                Some(AnswerOutcome {
                    key,
                    correct,
                    score,
                    advance_after,
                })
            }
        }
    }

    /// Deliver a fired auto-advance. Returns whether a new question was made;
    /// tickets that are no longer pending are ignored.
    pub fn on_advance_due(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending_ticket() == Some(ticket) {
            self.next_question();
            true
        } else {
            tracing::trace!(?ticket, "stale advance ticket ignored");
            false
        }
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.cancel_pending();
        self.next_ticket += 1;
        let ticket = AdvanceTicket(self.next_ticket);
        let handle = self.scheduler.schedule(delay, ticket);
        self.pending = Some((ticket, handle));
    }

    fn cancel_pending(&mut self) {
        if let Some((_, mut handle)) = self.pending.take() {
            handle.cancel();
        }
    }

    fn pick_direction(&mut self) -> Direction {
        match self.mode {
            QuizMode::ToKorean => Direction::TO_KOREAN,
            QuizMode::FromKorean => Direction::FROM_KOREAN,
            QuizMode::Mixed => {
                if self.rng.gen_bool(0.5) {
                    Direction::TO_KOREAN
                } else {
                    Direction::FROM_KOREAN
                }
            }
        }
    }

    fn pick_target(&mut self) -> usize {
        let len = self.words.len();
        let mut idx = self.rng.gen_range(0..len);
        let mut attempts = 1;
        while attempts < self.settings.quiz.max_retries
            && self.last_key.as_deref() == Some(self.words[idx].key())
        {
            idx = self.rng.gen_range(0..len);
            attempts += 1;
        }
        idx
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn options(&self) -> &[QuizOption] {
        self.question
            .as_ref()
            .map(|q| q.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.state == QuizState::Answered
    }

    /// Ticket of the outstanding auto-advance, if any.
    pub fn pending_ticket(&self) -> Option<AdvanceTicket> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

fn distinct_keys(words: &[Word]) -> usize {
    words.iter().map(Word::key).collect::<HashSet<_>>().len()
}

impl<R> std::fmt::Debug for QuizEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizEngine")
            .field("words", &self.words.len())
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("question", &self.question)
            .field("selected", &self.selected)
            .field("pending", &self.pending.as_ref().map(|(t, _)| *t))
            .finish()
    }
}
