//! biblio-backend — external collaborators for the search-session engine.
//!
//! Everything here talks to the outside world and hides behind a trait or a
//! thin store handle: the search service ([`search::SearchBackend`] /
//! [`search::MeiliClient`]), the TTL key-value store ([`kv::KvBackend`] /
//! [`kv::MemoryKv`]), and the session/preference records layered on top.

pub mod counter;
pub mod kv;
pub mod prefs;
pub mod search;
pub mod session;

pub use counter::{HitCounter, NoopCounter};
pub use kv::{KvBackend, KvError, MemoryKv};
pub use prefs::{PreferencePatch, PreferenceStore};
pub use search::{MeiliClient, SearchBackend, SearchError, SearchRequest, SearchResponse};
pub use session::SessionStore;
