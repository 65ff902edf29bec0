//! Shared fixtures for host integration tests.

#![allow(dead_code)]

use hancards_app::state::StudyApp;
use hancards_app::storage::{MemoryRepository, StoredData};
use hancards_core::{AdvanceScheduler, ManualScheduler, Pack, StudySettings, Word};

pub const PACK_ID: &str = "pack-tc3-1";

/// Four words with distinct English lengths.
pub fn sample_words() -> Vec<Word> {
    vec![
        Word::new("학기", "semester"),
        Word::new("과목", "subject"),
        Word::new("시험", "exam"),
        Word::new("대인 관계", "social relations"),
    ]
}

pub fn sample_pack(enabled: bool) -> Pack {
    Pack {
        id: PACK_ID.to_string(),
        name: "TC3 - Bài 1".to_string(),
        category: "TC3".to_string(),
        words: sample_words(),
        enabled,
    }
}

pub fn stored_data(packs: Vec<Pack>) -> StoredData {
    StoredData {
        packs,
        ..StoredData::default()
    }
}

/// CSV with two packs in one category.
pub fn sample_csv() -> &'static str {
    "pack_category,pack_name,korean,english\n\
     TC3,TC3 - Bài 1,학기,semester\n\
     TC3,TC3 - Bài 1,과목,subject\n\
     TC3,TC3 - Bài 2,대인 관계,\"social relations, friends\"\n\
     TC3,TC3 - Bài 2,,missing korean\n"
}

/// An app over an in-memory repository, with handles kept for inspection.
pub struct TestApp {
    pub app: StudyApp,
    pub repository: MemoryRepository,
    pub scheduler: ManualScheduler,
}

impl TestApp {
    pub fn open(data: StoredData) -> Self {
        let repository = MemoryRepository::with_data(data);
        let scheduler = ManualScheduler::new();
        let app = StudyApp::open(
            Box::new(repository.clone()),
            StudySettings::default(),
            Box::new(scheduler.clone()),
        )
        .expect("memory repository loads");
        Self {
            app,
            repository,
            scheduler,
        }
    }

    pub fn empty() -> Self {
        Self::open(StoredData::default())
    }

    pub fn with_enabled_pack() -> Self {
        Self::open(stored_data(vec![sample_pack(true)]))
    }
}

/// Open an app with a custom scheduler over the given data.
pub fn open_with_scheduler(
    data: StoredData,
    scheduler: Box<dyn AdvanceScheduler>,
) -> (StudyApp, MemoryRepository) {
    let repository = MemoryRepository::with_data(data);
    let app = StudyApp::open(
        Box::new(repository.clone()),
        StudySettings::default(),
        scheduler,
    )
    .expect("memory repository loads");
    (app, repository)
}
