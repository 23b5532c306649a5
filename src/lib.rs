//! biblio — search-session and result-presentation engine for a book
//! catalog.
//!
//! This crate is the orchestration layer: it turns free-text queries and
//! encoded button tokens into search calls, renders result pages, and
//! keeps per-user session state alive. The pure pieces (filter compiler,
//! paginator, layout engine, action grammar) live in `biblio-core`; the
//! external collaborators (search backend, KV store, counters) in
//! `biblio-backend`.
//!
//! # Architecture
//!
//! ```text
//! transport ──► Orchestrator ──► SearchBackend (Meilisearch)
//!                   │  │
//!                   │  └──────► SessionStore / PreferenceStore (KV)
//!                   └─────────► CounterQueue (background increments)
//! ```
//!
//! Every interaction is one orchestrator call returning an [`Outcome`];
//! the transport owns message delivery and nothing else.
//!
//! [`Outcome`]: orchestrator::Outcome

pub mod console;
pub mod orchestrator;
pub mod render;
pub mod tasks;

pub use orchestrator::{Orchestrator, Outcome, RenderPayload};
