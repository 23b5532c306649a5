//! Shared test utilities for the biblio integration harnesses.
//!
//! Import everything via `mod common; use common::*;` at the top of each
//! harness file. Setups are deterministic: the search backend replays
//! scripted responses and the KV store is in-process, so harnesses work
//! under `tokio::time::pause()`.

pub mod builders;
pub mod fakes;

pub use builders::*;
pub use fakes::*;
