//! Builders for orchestrator harness setups and catalog fixtures.

use crate::common::fakes::{DownKv, FakeSearch, RecordingCounter};
use biblio::tasks::CounterQueue;
use biblio::Orchestrator;
use biblio_backend::SearchResponse;
use biblio_backend::{KvBackend, MemoryKv, PreferenceStore, SessionStore};
use biblio_core::types::{SearchHit, SearchSession};
use std::sync::Arc;
use std::time::Duration;

pub const PAGE_SIZE: u32 = 10;
pub const SESSION_TTL: Duration = Duration::from_secs(3600);
pub const PREFS_TTL: Duration = Duration::from_secs(90 * 24 * 3600);

/// A fully wired orchestrator over fakes, with handles kept for assertions.
pub struct TestEngine {
    pub orchestrator: Orchestrator,
    pub search: Arc<FakeSearch>,
    pub counter: Arc<RecordingCounter>,
    pub sessions: SessionStore,
    pub prefs: PreferenceStore,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::over_kv(Arc::new(MemoryKv::new()))
    }

    /// Engine whose KV store rejects every operation.
    pub fn with_down_kv() -> Self {
        Self::over_kv(Arc::new(DownKv))
    }

    fn over_kv(kv: Arc<dyn KvBackend>) -> Self {
        let search = Arc::new(FakeSearch::new());
        let counter = Arc::new(RecordingCounter::default());
        let sessions = SessionStore::new(kv.clone(), SESSION_TTL);
        let prefs = PreferenceStore::new(kv, PREFS_TTL);
        let orchestrator = Orchestrator::new(
            search.clone(),
            sessions.clone(),
            prefs.clone(),
            CounterQueue::new(counter.clone(), 16),
            PAGE_SIZE,
        );
        TestEngine {
            orchestrator,
            search,
            counter,
            sessions,
            prefs,
        }
    }

    /// Stored session for `user`, or a panic if none survives.
    pub async fn stored_session(&self, user: u64) -> SearchSession {
        self.sessions
            .get(user)
            .await
            .expect("kv store must answer")
            .expect("no session stored")
    }
}

/// One catalog hit with deterministic display fields derived from `id`.
pub fn hit(id: u64) -> SearchHit {
    SearchHit {
        id,
        title: Some(format!("书目 {id}")),
        author: Some("佚名".to_string()),
        file_name: format!("book-{id}.epub"),
        file_size: 1024 * 1024 + id,
        ext: "EPUB".to_string(),
        word_count: Some(250_000),
        content_rating: Some(0),
        downloads: id * 3,
        collections: None,
    }
}

pub fn hits(ids: std::ops::Range<u64>) -> Vec<SearchHit> {
    ids.map(hit).collect()
}

/// A page of `returned` hits out of an estimated `total`.
pub fn page_of(returned: std::ops::Range<u64>, total: u64) -> SearchResponse {
    SearchResponse {
        hits: hits(returned),
        estimated_total_hits: total,
    }
}
