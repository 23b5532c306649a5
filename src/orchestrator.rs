//! Interaction orchestrator — the single entry point tying search,
//! sessions, preferences, and layout together.
//!
//! Two operations cover every user interaction: [`Orchestrator::search`]
//! starts a fresh query, [`Orchestrator::act`] replays a button token
//! against the stored session. Both return an [`Outcome`] the transport
//! renders; the orchestrator itself never talks to a user directly.

use crate::render;
use crate::tasks::CounterQueue;
use biblio_core::action::Action;
use biblio_core::layout::{self, Grid, GridState, LayoutMode};
use biblio_core::types::{ButtonMode, ContentRating, QueryKind, SearchSession};
use biblio_core::{filter, page};
use biblio_backend::{PreferenceStore, SearchBackend, SearchRequest, SessionStore};
use std::sync::Arc;

/// A rendered result page: the message body and its button grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    pub text: String,
    pub grid: Grid,
}

/// What the transport should do after one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Replace the message with a fresh result page.
    Results(RenderPayload),
    /// Replace only the grid with a filter option menu; the text stays.
    FilterMenu(Grid),
    /// The query (or current filter combination) matched nothing.
    NoResults,
    /// No stored session — the token outlived its hour. Prompt for a new
    /// search instead of guessing.
    SessionExpired,
    /// A backing service failed; the interaction was not applied.
    Unavailable,
    /// The token was not recognised; carries the parse failure for logs.
    Invalid(String),
    /// The user picked a result; deliver document `id`.
    Selected(u64),
    /// Open the settings surface (owned by the transport).
    Settings,
    /// Dismiss the current message.
    Close,
    /// Inert button; acknowledge and change nothing.
    Noop,
}

/// Ties the backends together. Cheap to clone; handles are shared.
#[derive(Clone)]
pub struct Orchestrator {
    search: Arc<dyn SearchBackend>,
    sessions: SessionStore,
    prefs: PreferenceStore,
    counters: CounterQueue,
    page_size: u32,
}

impl Orchestrator {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        sessions: SessionStore,
        prefs: PreferenceStore,
        counters: CounterQueue,
        page_size: u32,
    ) -> Self {
        Orchestrator {
            search,
            sessions,
            prefs,
            counters,
            page_size,
        }
    }

    /// Run a query. Query text always starts a fresh session — page 0,
    /// relevance sort, filters seeded from the user's stored content-rating
    /// preference — even when the text matches the stored session. Only
    /// button interactions carry refinements forward.
    pub async fn search(&self, user: u64, query: &str, kind: QueryKind) -> Outcome {
        let prefs = match self.prefs.get(user).await {
            Ok(prefs) => prefs,
            Err(err) => {
                // Preferences are a convenience, not a gate.
                tracing::warn!(user, %err, "preference read failed, using defaults");
                Default::default()
            }
        };

        let mut session = SearchSession::new(query, kind);
        if prefs.content_rating != ContentRating::All {
            session.filters.rating = Some(prefs.content_rating);
        }
        tracing::info!(user, query, ?kind, "new search");
        self.run(user, session, LayoutMode::Default).await
    }

    /// Replay one encoded button token against the user's stored session.
    pub async fn act(&self, user: u64, token: &str) -> Outcome {
        let action = match Action::parse(token) {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(user, token, %err, "rejecting action token");
                return Outcome::Invalid(err.to_string());
            }
        };

        // Session-free actions first.
        match action {
            Action::Noop => return Outcome::Noop,
            Action::Close => return Outcome::Close,
            Action::Settings => return Outcome::Settings,
            Action::Select(id) => {
                // The counter tracks deliveries, not previews: only a
                // download-mode selection hands the user the file.
                match self.prefs.get(user).await {
                    Ok(prefs) if prefs.button_mode == ButtonMode::Download => {
                        self.counters.dispatch(id);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(user, %err, "preference read failed, not counting download");
                    }
                }
                return Outcome::Selected(id);
            }
            _ => {}
        }

        let mut session = match self.sessions.get(user).await {
            Ok(Some(session)) => session,
            Ok(None) => return Outcome::SessionExpired,
            Err(err) => {
                tracing::error!(user, %err, "session read failed");
                return Outcome::Unavailable;
            }
        };

        let mode = match action {
            Action::Page(n) => {
                session.page = n;
                LayoutMode::Default
            }
            Action::Jump(n) => {
                session.page = n;
                LayoutMode::PagePicker
            }
            Action::PageSelect => LayoutMode::PagePicker,
            Action::BackToSearch => LayoutMode::Default,
            Action::Sort(key) => {
                session.sort = key;
                session.page = 0;
                LayoutMode::Default
            }
            Action::FilterSet(value) => {
                session.filters.set(value);
                session.page = 0;
                LayoutMode::Default
            }
            Action::FilterClear(key) => {
                session.filters.clear(key);
                session.page = 0;
                LayoutMode::Default
            }
            Action::FilterMenu(key) => {
                // Pure grid swap; no search, no session write.
                return Outcome::FilterMenu(layout::filter_menu_grid(key, &session.filters));
            }
            // Handled above.
            Action::Noop
            | Action::Close
            | Action::Settings
            | Action::Select(_) => unreachable!("session-free action"),
        };

        self.run(user, session, mode).await
    }

    /// Execute the search the session describes, lay out the page, and
    /// persist the session. The session is only written once results exist,
    /// so a failed or empty search never clobbers stored state.
    async fn run(&self, user: u64, session: SearchSession, mode: LayoutMode) -> Outcome {
        let compiled = filter::compile(&session.query, session.kind, &session.filters, session.sort);
        let request = SearchRequest {
            // In tag mode the tag rides in the filter expression.
            q: match session.kind {
                QueryKind::Text => session.query.clone(),
                QueryKind::Tag => String::new(),
            },
            limit: self.page_size,
            offset: u64::from(session.page) * u64::from(self.page_size),
            filter: compiled.filter,
            sort: compiled.sort,
        };

        let response = match self.search.search(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(user, %err, "search backend call failed");
                return Outcome::Unavailable;
            }
        };

        if response.hits.is_empty() {
            tracing::info!(user, page = session.page, "search returned nothing");
            return Outcome::NoResults;
        }

        let frame = page::frame(
            response.estimated_total_hits,
            session.page,
            self.page_size,
            response.hits.len(),
        );
        let text = render::result_list(&response.hits, &frame, response.estimated_total_hits);
        let hit_ids: Vec<u64> = response.hits.iter().map(|hit| hit.id).collect();
        let grid = layout::layout(
            mode,
            &GridState {
                page: session.page,
                total_pages: frame.total_pages,
                hit_ids: &hit_ids,
                sort: session.sort,
                filters: &session.filters,
            },
        );

        if let Err(err) = self.sessions.set(user, &session).await {
            tracing::error!(user, %err, "session write failed");
            return Outcome::Unavailable;
        }

        Outcome::Results(RenderPayload { text, grid })
    }
}
