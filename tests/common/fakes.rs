//! Scripted stand-ins for the external collaborators.

use async_trait::async_trait;
use biblio_backend::{
    HitCounter, KvBackend, KvError, SearchBackend, SearchError, SearchRequest, SearchResponse,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Search backend that replays scripted responses and records every request
/// it receives, in order.
#[derive(Default)]
pub struct FakeSearch {
    requests: Mutex<Vec<SearchRequest>>,
    responses: Mutex<VecDeque<Result<SearchResponse, SearchError>>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response. Responses are consumed in FIFO order; when
    /// the queue is empty the backend answers with an empty result set.
    pub fn push_response(&self, response: SearchResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(SearchError::Transport("scripted failure".into())));
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> SearchRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no search request was made")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchResponse::default()))
    }
}

/// Counter that records every increment it receives.
#[derive(Default)]
pub struct RecordingCounter {
    seen: Mutex<Vec<u64>>,
}

impl RecordingCounter {
    pub fn seen(&self) -> Vec<u64> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HitCounter for RecordingCounter {
    async fn increment_downloads(&self, id: u64) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(id);
        Ok(())
    }
}

/// KV backend where every operation fails, as a downed store would.
pub struct DownKv;

#[async_trait]
impl KvBackend for DownKv {
    async fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
        Err(KvError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), KvError> {
        Err(KvError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), KvError> {
        Err(KvError::Unavailable("connection refused".into()))
    }
}
