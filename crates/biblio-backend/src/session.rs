//! Session store — per-user search state in the KV backend.
//!
//! Keys follow `search_ctx:{user}` with the configured idle TTL. `merge`
//! is a plain read-modify-write: concurrent interactions from the same
//! user may race and the last full write wins. That weak-consistency
//! contract is deliberate; do not add locking here.

use crate::kv::{KvBackend, KvError};
use biblio_core::types::{SearchSession, SessionPatch};
use std::sync::Arc;
use std::time::Duration;

/// Handle to the per-user session records.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KvBackend>,
    ttl: Duration,
}

fn session_key(user: u64) -> String {
    format!("search_ctx:{user}")
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KvBackend>, ttl: Duration) -> Self {
        SessionStore { kv, ttl }
    }

    /// Fetch the stored session, if present and not expired. A record that
    /// fails to decode is treated as absent (and logged); a stale writer
    /// must never wedge the user.
    pub async fn get(&self, user: u64) -> Result<Option<SearchSession>, KvError> {
        let Some(raw) = self.kv.get(&session_key(user)).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(user, %err, "discarding undecodable session record");
                Ok(None)
            }
        }
    }

    /// Write the full session, refreshing the idle TTL.
    pub async fn set(&self, user: u64, session: &SearchSession) -> Result<(), KvError> {
        let raw = serde_json::to_string(session)
            .map_err(|err| KvError::Unavailable(err.to_string()))?;
        self.kv.set(&session_key(user), raw, self.ttl).await
    }

    /// Shallow-merge `patch` into the stored session and write it back.
    /// Returns the merged session, or `None` when no session exists —
    /// merge never creates one.
    pub async fn merge(
        &self,
        user: u64,
        patch: &SessionPatch,
    ) -> Result<Option<SearchSession>, KvError> {
        let Some(mut session) = self.get(user).await? else {
            return Ok(None);
        };
        patch.apply(&mut session);
        self.set(user, &session).await?;
        Ok(Some(session))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
