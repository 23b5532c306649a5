//! Background counter queue — fire-and-forget download-count increments.
//!
//! A bounded mpsc channel drained by one worker task. The request path
//! never waits on the increment and no ordering is guaranteed relative to
//! later reads; the counter is non-critical. Failures are logged, never
//! retried; a full queue drops the increment with a warning rather than
//! backpressuring an interaction.

use biblio_backend::HitCounter;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle for dispatching increments to the background worker.
#[derive(Clone)]
pub struct CounterQueue {
    tx: mpsc::Sender<u64>,
}

impl CounterQueue {
    /// Spawn the worker draining into `counter`. `capacity` bounds the
    /// number of pending increments.
    pub fn new(counter: Arc<dyn HitCounter>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<u64>(capacity);
        tokio::spawn(async move {
            while let Some(id) = rx.recv().await {
                if let Err(err) = counter.increment_downloads(id).await {
                    tracing::warn!(id, %err, "download counter increment failed");
                }
            }
        });
        CounterQueue { tx }
    }

    /// Enqueue an increment without waiting. Dropped (and logged) when the
    /// queue is full or the worker is gone.
    pub fn dispatch(&self, id: u64) {
        if let Err(err) = self.tx.try_send(id) {
            tracing::warn!(id, %err, "dropping download counter increment");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
