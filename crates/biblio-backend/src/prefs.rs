//! Preference store — long-lived user settings in the KV backend.
//!
//! The engine itself only consumes `content_rating` (default rating filter
//! on new queries); the rest of the record is the read/write contract the
//! settings surface builds on. Absent or undecodable records read as the
//! defaults.

use crate::kv::{KvBackend, KvError};
use biblio_core::types::{ButtonMode, ContentRating, UserPreferences};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Shallow preference patch; unset fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<ContentRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_mode: Option<ButtonMode>,
}

/// Handle to the per-user preference records.
#[derive(Clone)]
pub struct PreferenceStore {
    kv: Arc<dyn KvBackend>,
    ttl: Duration,
}

fn prefs_key(user: u64) -> String {
    format!("user_prefs:{user}")
}

impl PreferenceStore {
    pub fn new(kv: Arc<dyn KvBackend>, ttl: Duration) -> Self {
        PreferenceStore { kv, ttl }
    }

    /// Read the user's preferences, falling back to the default record.
    pub async fn get(&self, user: u64) -> Result<UserPreferences, KvError> {
        let Some(raw) = self.kv.get(&prefs_key(user)).await? else {
            return Ok(UserPreferences::default());
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => Ok(prefs),
            Err(err) => {
                tracing::warn!(user, %err, "discarding undecodable preference record");
                Ok(UserPreferences::default())
            }
        }
    }

    /// Merge `patch` over the current record (or the defaults) and persist
    /// it, refreshing the TTL. Returns the merged record.
    pub async fn update(
        &self,
        user: u64,
        patch: &PreferencePatch,
    ) -> Result<UserPreferences, KvError> {
        let mut prefs = self.get(user).await?;
        if let Some(rating) = patch.content_rating {
            prefs.content_rating = rating;
        }
        if let Some(mode) = patch.button_mode {
            prefs.button_mode = mode;
        }
        let raw = serde_json::to_string(&prefs)
            .map_err(|err| KvError::Unavailable(err.to_string()))?;
        self.kv.set(&prefs_key(user), raw, self.ttl).await?;
        Ok(prefs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
