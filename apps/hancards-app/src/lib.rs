//! HanCards host: configuration, logging, persistence, commands and the
//! event loop around `hancards-core`.

pub mod commands;
pub mod config;
pub mod events;
pub mod state;
pub mod storage;
pub mod view;

use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::events::InputEvent;
use crate::state::StudyApp;
use crate::storage::JsonFileRepository;
use crate::view::StudyView;
use hancards_core::TokioScheduler;

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Start the app from the environment and serve the input layer until it
/// shuts down.
pub async fn run(
    input: mpsc::Receiver<InputEvent>,
    view: watch::Sender<StudyView>,
) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_filter);

    let data_file = config.data_file();
    tracing::info!("Loading study data from {}", data_file.display());
    let repository = JsonFileRepository::open(&data_file);

    let (scheduler, tickets) = TokioScheduler::new();
    let mut app = StudyApp::open(Box::new(repository), config.settings, Box::new(scheduler))?;

    app.run(input, tickets, view).await;
    app.persist();
    tracing::info!("study app stopped");
    Ok(())
}
