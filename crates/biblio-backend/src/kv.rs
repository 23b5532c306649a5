//! Key-value backend seam — the store the session and preference layers
//! write through.
//!
//! Production deployments point this at an external store (Redis or
//! compatible); [`MemoryKv`] is the in-process implementation used as the
//! shipped fallback and by every harness. Values are opaque strings with a
//! per-key TTL; expiry is lazy on read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Failure talking to the key-value store.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("key-value backend unavailable: {0}")]
    Unavailable(String),
}

/// Minimal TTL key-value contract.
///
/// No compare-and-swap: read-modify-write callers (session merge) are
/// last-write-wins by design.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), KvError>;
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}

// ---------------------------------------------------------------------------
// MemoryKv
// ---------------------------------------------------------------------------

/// In-process TTL map. Uses the tokio clock so harnesses can advance time
/// deterministically with `tokio::time::pause()`.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    deadline: Instant,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KvBackend for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.deadline > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), KvError> {
        let deadline = Instant::now() + ttl;
        self.lock().insert(key.to_string(), Entry { value, deadline });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.lock().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
