//! Download-counter seam.
//!
//! The catalog store owns the real counter; the engine only ever fires
//! best-effort increments at it through this trait (see the root crate's
//! counter queue). [`NoopCounter`] is the wiring default when no catalog
//! store is attached.

use async_trait::async_trait;

/// Non-critical counter increments on catalog records.
#[async_trait]
pub trait HitCounter: Send + Sync {
    async fn increment_downloads(&self, id: u64) -> anyhow::Result<()>;
}

/// Discards increments. Used when the catalog store is not wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCounter;

#[async_trait]
impl HitCounter for NoopCounter {
    async fn increment_downloads(&self, _id: u64) -> anyhow::Result<()> {
        Ok(())
    }
}
