//! Application state.

use crate::commands::{self, CommandError};
use crate::events::{self, InputEvent};
use crate::storage::{PackRepository, StorageError};
use crate::view::StudyView;
use hancards_core::{
    AdvanceScheduler, AdvanceTicket, Change, FlashcardSession, ImportSummary, PackLibrary,
    QuizEngine, ScoreTable, StudySettings,
};
use tokio::sync::{mpsc, watch};

/// Owns the pack library, scores and both study sessions. Every event from
/// the input layer goes through here on a single logical thread.
pub struct StudyApp {
    pub(crate) library: PackLibrary,
    pub(crate) scores: ScoreTable,
    pub(crate) flashcards: FlashcardSession,
    pub(crate) quiz: QuizEngine,
    pub(crate) settings: StudySettings,
    pub(crate) last_import: Option<ImportSummary>,
    repository: Box<dyn PackRepository>,
}

impl StudyApp {
    /// Load stored data and start both sessions on the active words.
    pub fn open(
        repository: Box<dyn PackRepository>,
        settings: StudySettings,
        scheduler: Box<dyn AdvanceScheduler>,
    ) -> Result<Self, StorageError> {
        let data = repository.load()?;
        let mut app = Self {
            library: PackLibrary::new(data.packs),
            scores: data.scores,
            flashcards: FlashcardSession::new(settings),
            quiz: QuizEngine::new(settings, scheduler),
            settings,
            last_import: None,
            repository,
        };
        app.reload_sessions();
        tracing::info!(
            packs = app.library.packs().len(),
            active_words = app.flashcards.words().len(),
            "study app ready"
        );
        Ok(app)
    }

    pub fn library(&self) -> &PackLibrary {
        &self.library
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn flashcards(&self) -> &FlashcardSession {
        &self.flashcards
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    pub fn settings(&self) -> &StudySettings {
        &self.settings
    }

    pub fn last_import(&self) -> Option<ImportSummary> {
        self.last_import
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), CommandError> {
        commands::dispatch(self, event)
    }

    pub fn view(&self) -> StudyView {
        StudyView::capture(self)
    }

    /// Run the event loop on this app. See [`events::run_event_loop`].
    pub async fn run(
        &mut self,
        input: mpsc::Receiver<InputEvent>,
        tickets: mpsc::UnboundedReceiver<AdvanceTicket>,
        view: watch::Sender<StudyView>,
    ) {
        events::run_event_loop(self, input, tickets, view).await;
    }

    /// Forward a fired auto-advance to the quiz.
    pub fn on_advance_due(&mut self, ticket: AdvanceTicket) -> bool {
        self.quiz.on_advance_due(ticket)
    }

    /// Save packs and scores. Failures are logged and otherwise ignored.
    pub(crate) fn persist(&self) {
        if let Err(err) = self
            .repository
            .persist(self.library.packs(), &self.scores)
        {
            tracing::warn!(error = %err, "failed to persist study data");
        }
    }

    /// Persist, and restart both sessions when the active words changed.
    pub(crate) fn commit(&mut self, change: Change) {
        if change == Change::ActiveWords {
            self.reload_sessions();
        }
        self.persist();
    }

    fn reload_sessions(&mut self) {
        let words = self.library.active_words();
        self.flashcards.replace_words(words.clone(), &self.scores);
        self.quiz.replace_words(words);
    }
}
