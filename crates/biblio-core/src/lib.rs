//! biblio-core — pure leaves of the search-session engine.
//!
//! This crate holds everything that is deterministic and side-effect free:
//! the shared types, the button-token vocabulary, the filter compiler, the
//! paginator, and the layout engine. External collaborators (search
//! backend, key-value store) live in `biblio-backend`; the orchestrator
//! that ties them together lives in the root crate.
//!
//! # Architecture
//!
//! ```text
//! transport ──► orchestrator ──► FilterCompiler ──► search backend
//!                    │                 │
//!                    ├──► Paginator ◄──┘
//!                    ├──► LayoutEngine
//!                    └──► SessionStore (KV)
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod page;
pub mod types;

pub use action::Action;
pub use error::ActionError;
pub use types::{
    ButtonMode, ContentRating, FilterKey, FilterSelection, FilterValue, FormatFilter, QueryKind,
    SearchHit, SearchSession, SessionPatch, SizeBand, SortKey, UserPreferences, WordBand,
};
