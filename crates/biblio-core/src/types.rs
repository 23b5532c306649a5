//! Core types for biblio.
//!
//! This module defines the shared vocabulary of the engine: the per-user
//! [`SearchSession`], the closed filter/sort enumerations, and the
//! [`SearchHit`] record returned by the search backend.
//!
//! Every user-facing selection is a closed enum. Filter values arriving as
//! strings (action tokens, stored sessions) are validated at the boundary;
//! anything outside the enumerated domain is rejected or dropped before it
//! can reach the filter compiler.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sort and query kind
// ---------------------------------------------------------------------------

/// Result ordering requested by the user.
///
/// `Best` is the backend's relevance default and emits no sort directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Best,
    Hot,
    New,
    Big,
}

impl SortKey {
    /// Wire label used in action tokens and the stored session.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Best => "best",
            SortKey::Hot => "hot",
            SortKey::New => "new",
            SortKey::Big => "big",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "best" => Some(SortKey::Best),
            "hot" => Some(SortKey::Hot),
            "new" => Some(SortKey::New),
            "big" => Some(SortKey::Big),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the free-text query is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Relevance search over title/author/keywords.
    #[default]
    Text,
    /// The query string is an exact-match tag value; the free-text field is
    /// not separately searched.
    Tag,
}

// ---------------------------------------------------------------------------
// Filter keys and values
// ---------------------------------------------------------------------------

/// The four recognised filter dimensions. Unknown keys are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Rating,
    Format,
    Size,
    Words,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Rating,
        FilterKey::Format,
        FilterKey::Size,
        FilterKey::Words,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Rating => "rating",
            FilterKey::Format => "format",
            FilterKey::Size => "size",
            FilterKey::Words => "words",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rating" => Some(FilterKey::Rating),
            "format" => Some(FilterKey::Format),
            "size" => Some(FilterKey::Size),
            "words" => Some(FilterKey::Words),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content rating ceiling. `All` is the no-filter sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentRating {
    #[default]
    #[serde(rename = "ALL")]
    All,
    G,
    R15,
    R18,
}

impl ContentRating {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentRating::All => "ALL",
            ContentRating::G => "G",
            ContentRating::R15 => "R15",
            ContentRating::R18 => "R18",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ALL" => Some(ContentRating::All),
            "G" => Some(ContentRating::G),
            "R15" => Some(ContentRating::R15),
            "R18" => Some(ContentRating::R18),
            _ => None,
        }
    }

    /// Numeric ceiling used in the backend expression (`content_rating <= n`).
    /// `All` has no ceiling.
    pub fn ceiling(self) -> Option<u8> {
        match self {
            ContentRating::All => None,
            ContentRating::G => Some(0),
            ContentRating::R15 => Some(1),
            ContentRating::R18 => Some(2),
        }
    }
}

/// File format filter. `All` is the no-filter sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatFilter {
    #[default]
    All,
    Pdf,
    Epub,
    Txt,
    Mobi,
    Azw3,
}

impl FormatFilter {
    pub const ALL_OPTIONS: [FormatFilter; 6] = [
        FormatFilter::All,
        FormatFilter::Pdf,
        FormatFilter::Epub,
        FormatFilter::Txt,
        FormatFilter::Mobi,
        FormatFilter::Azw3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatFilter::All => "ALL",
            FormatFilter::Pdf => "PDF",
            FormatFilter::Epub => "EPUB",
            FormatFilter::Txt => "TXT",
            FormatFilter::Mobi => "MOBI",
            FormatFilter::Azw3 => "AZW3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL_OPTIONS.into_iter().find(|f| f.as_str() == s)
    }
}

/// File size band over `file_size` (bytes, MiB boundaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeBand {
    #[serde(rename = "<5MB")]
    Under5,
    #[serde(rename = "5-20MB")]
    From5To20,
    #[serde(rename = "20-50MB")]
    From20To50,
    #[serde(rename = ">50MB")]
    Over50,
}

impl SizeBand {
    pub const ALL_OPTIONS: [SizeBand; 4] = [
        SizeBand::Under5,
        SizeBand::From5To20,
        SizeBand::From20To50,
        SizeBand::Over50,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeBand::Under5 => "<5MB",
            SizeBand::From5To20 => "5-20MB",
            SizeBand::From20To50 => "20-50MB",
            SizeBand::Over50 => ">50MB",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL_OPTIONS.into_iter().find(|b| b.as_str() == s)
    }

    /// Half-open byte interval `[lo, hi)`; either end may be open.
    pub fn bounds(self) -> (Option<u64>, Option<u64>) {
        const MIB: u64 = 1024 * 1024;
        match self {
            SizeBand::Under5 => (None, Some(5 * MIB)),
            SizeBand::From5To20 => (Some(5 * MIB), Some(20 * MIB)),
            SizeBand::From20To50 => (Some(20 * MIB), Some(50 * MIB)),
            SizeBand::Over50 => (Some(50 * MIB), None),
        }
    }
}

/// Word-count band over `word_count`. Labels use 万 (10 000) units as the
/// catalog's UI does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordBand {
    #[serde(rename = "<10万")]
    Under100k,
    #[serde(rename = "10-50万")]
    From100kTo500k,
    #[serde(rename = "50-100万")]
    From500kTo1m,
    #[serde(rename = ">100万")]
    Over1m,
}

impl WordBand {
    pub const ALL_OPTIONS: [WordBand; 4] = [
        WordBand::Under100k,
        WordBand::From100kTo500k,
        WordBand::From500kTo1m,
        WordBand::Over1m,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WordBand::Under100k => "<10万",
            WordBand::From100kTo500k => "10-50万",
            WordBand::From500kTo1m => "50-100万",
            WordBand::Over1m => ">100万",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL_OPTIONS.into_iter().find(|b| b.as_str() == s)
    }

    /// Half-open word-count interval `[lo, hi)`.
    pub fn bounds(self) -> (Option<u64>, Option<u64>) {
        match self {
            WordBand::Under100k => (None, Some(100_000)),
            WordBand::From100kTo500k => (Some(100_000), Some(500_000)),
            WordBand::From500kTo1m => (Some(500_000), Some(1_000_000)),
            WordBand::Over1m => (Some(1_000_000), None),
        }
    }
}

/// One validated filter value, tagged by its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue {
    Rating(ContentRating),
    Format(FormatFilter),
    Size(SizeBand),
    Words(WordBand),
}

impl FilterValue {
    /// Validate a raw string against the domain of `key`. Returns `None` for
    /// anything outside the fixed enumeration.
    pub fn parse(key: FilterKey, raw: &str) -> Option<Self> {
        match key {
            FilterKey::Rating => ContentRating::parse(raw).map(FilterValue::Rating),
            FilterKey::Format => FormatFilter::parse(raw).map(FilterValue::Format),
            FilterKey::Size => SizeBand::parse(raw).map(FilterValue::Size),
            FilterKey::Words => WordBand::parse(raw).map(FilterValue::Words),
        }
    }

    pub fn key(self) -> FilterKey {
        match self {
            FilterValue::Rating(_) => FilterKey::Rating,
            FilterValue::Format(_) => FilterKey::Format,
            FilterValue::Size(_) => FilterKey::Size,
            FilterValue::Words(_) => FilterKey::Words,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterValue::Rating(v) => v.as_str(),
            FilterValue::Format(v) => v.as_str(),
            FilterValue::Size(v) => v.as_str(),
            FilterValue::Words(v) => v.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// The active filter selection: at most one validated value per key.
///
/// Stored as part of the session; missing fields deserialize as unset so
/// older session records remain readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<ContentRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<WordBand>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.format.is_none() && self.size.is_none() && self.words.is_none()
    }

    /// Set the slot matching the value's key.
    pub fn set(&mut self, value: FilterValue) {
        match value {
            FilterValue::Rating(v) => self.rating = Some(v),
            FilterValue::Format(v) => self.format = Some(v),
            FilterValue::Size(v) => self.size = Some(v),
            FilterValue::Words(v) => self.words = Some(v),
        }
    }

    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Rating => self.rating = None,
            FilterKey::Format => self.format = None,
            FilterKey::Size => self.size = None,
            FilterKey::Words => self.words = None,
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<FilterValue> {
        match key {
            FilterKey::Rating => self.rating.map(FilterValue::Rating),
            FilterKey::Format => self.format.map(FilterValue::Format),
            FilterKey::Size => self.size.map(FilterValue::Size),
            FilterKey::Words => self.words.map(FilterValue::Words),
        }
    }

    /// Wire label of the active value for `key`, skipping the `ALL` sentinel.
    /// Used to decorate filter-menu trigger buttons.
    pub fn active_label(&self, key: FilterKey) -> Option<&'static str> {
        match self.get(key)? {
            FilterValue::Rating(ContentRating::All) | FilterValue::Format(FormatFilter::All) => {
                None
            }
            v => Some(v.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Session and preferences
// ---------------------------------------------------------------------------

/// Per-user ephemeral search state, persisted in the KV store under
/// `search_ctx:{user}` with a 1-hour idle TTL.
///
/// A session is overwritten wholesale by every new query text; pagination,
/// filter, and sort interactions only patch `page`, `sort`, and `filters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub query: String,
    #[serde(default)]
    pub kind: QueryKind,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub filters: FilterSelection,
}

impl SearchSession {
    /// Fresh session for a new query: page 0, relevance sort, no filters.
    pub fn new(query: impl Into<String>, kind: QueryKind) -> Self {
        SearchSession {
            query: query.into(),
            kind,
            page: 0,
            sort: SortKey::Best,
            filters: FilterSelection::default(),
        }
    }
}

/// Shallow patch applied by the session store's `merge`. Unset fields leave
/// the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSelection>,
}

impl SessionPatch {
    /// Apply this patch on top of `session`, field by field.
    pub fn apply(&self, session: &mut SearchSession) {
        if let Some(page) = self.page {
            session.page = page;
        }
        if let Some(sort) = self.sort {
            session.sort = sort;
        }
        if let Some(filters) = self.filters {
            session.filters = filters;
        }
    }
}

/// How a result-selection button behaves (preference record contract only;
/// delivery itself is the transport's business).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonMode {
    #[default]
    Preview,
    Download,
}

/// Long-lived per-user preferences. The engine reads `content_rating` to
/// seed a default rating filter on new queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub content_rating: ContentRating,
    #[serde(default)]
    pub button_mode: ButtonMode,
}

// ---------------------------------------------------------------------------
// Search hits
// ---------------------------------------------------------------------------

/// One matched document as returned by the search backend.
///
/// Opaque to the engine beyond identity and the display fields; ranking is
/// entirely the backend's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub content_rating: Option<u8>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub collections: Option<u64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_round_trip() {
        for s in [SortKey::Best, SortKey::Hot, SortKey::New, SortKey::Big] {
            assert_eq!(SortKey::parse(s.as_str()), Some(s));
        }
        assert_eq!(SortKey::parse("biggest"), None);
    }

    #[test]
    fn filter_value_rejects_out_of_domain() {
        assert_eq!(FilterValue::parse(FilterKey::Rating, "R21"), None);
        assert_eq!(FilterValue::parse(FilterKey::Format, "pdf"), None);
        assert_eq!(FilterValue::parse(FilterKey::Size, "5MB"), None);
        assert_eq!(FilterValue::parse(FilterKey::Words, "many"), None);
    }

    #[test]
    fn filter_value_accepts_full_domain() {
        for key in FilterKey::ALL {
            let labels: Vec<&str> = match key {
                FilterKey::Rating => vec!["ALL", "G", "R15", "R18"],
                FilterKey::Format => vec!["ALL", "PDF", "EPUB", "TXT", "MOBI", "AZW3"],
                FilterKey::Size => vec!["<5MB", "5-20MB", "20-50MB", ">50MB"],
                FilterKey::Words => vec!["<10万", "10-50万", "50-100万", ">100万"],
            };
            for label in labels {
                let v = FilterValue::parse(key, label)
                    .unwrap_or_else(|| panic!("{key}:{label} must parse"));
                assert_eq!(v.key(), key);
                assert_eq!(v.as_str(), label);
            }
        }
    }

    #[test]
    fn selection_set_clear_get() {
        let mut sel = FilterSelection::default();
        assert!(sel.is_empty());

        sel.set(FilterValue::Size(SizeBand::Over50));
        sel.set(FilterValue::Rating(ContentRating::R15));
        assert_eq!(sel.get(FilterKey::Size), Some(FilterValue::Size(SizeBand::Over50)));
        assert!(!sel.is_empty());

        sel.clear(FilterKey::Size);
        assert_eq!(sel.get(FilterKey::Size), None);
        assert_eq!(
            sel.get(FilterKey::Rating),
            Some(FilterValue::Rating(ContentRating::R15))
        );
    }

    #[test]
    fn active_label_skips_all_sentinel() {
        let mut sel = FilterSelection::default();
        sel.set(FilterValue::Format(FormatFilter::All));
        assert_eq!(sel.active_label(FilterKey::Format), None);

        sel.set(FilterValue::Format(FormatFilter::Epub));
        assert_eq!(sel.active_label(FilterKey::Format), Some("EPUB"));
        assert_eq!(sel.active_label(FilterKey::Words), None);
    }

    #[test]
    fn session_json_round_trip() {
        let mut session = SearchSession::new("三体", QueryKind::Text);
        session.page = 3;
        session.sort = SortKey::Hot;
        session.filters.set(FilterValue::Words(WordBand::Over1m));

        let json = serde_json::to_string(&session).unwrap();
        let back: SearchSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn session_tolerates_missing_fields() {
        // Minimal record, as an older writer might have produced.
        let back: SearchSession = serde_json::from_str(r#"{"query":"q"}"#).unwrap();
        assert_eq!(back.page, 0);
        assert_eq!(back.sort, SortKey::Best);
        assert_eq!(back.kind, QueryKind::Text);
        assert!(back.filters.is_empty());
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut session = SearchSession::new("q", QueryKind::Text);
        session.sort = SortKey::New;

        let patch = SessionPatch {
            page: Some(4),
            ..Default::default()
        };
        patch.apply(&mut session);
        assert_eq!(session.page, 4);
        assert_eq!(session.sort, SortKey::New);
    }

    #[test]
    fn size_band_bounds_are_mib() {
        assert_eq!(SizeBand::Over50.bounds(), (Some(52_428_800), None));
        assert_eq!(SizeBand::Under5.bounds(), (None, Some(5_242_880)));
    }

    #[test]
    fn preference_defaults() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.content_rating, ContentRating::All);
        assert_eq!(prefs.button_mode, ButtonMode::Preview);
    }
}
