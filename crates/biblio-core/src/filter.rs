//! Filter compiler — maps a validated filter selection plus the query mode
//! into the backend's boolean filter expression and sort directive.
//!
//! The compiler is a pure function: identical inputs always produce the
//! identical expression string, and clause order is fixed (tag, format,
//! rating, size, words) so distinct selections compile to distinct
//! expressions. Values outside the enumerated domains cannot reach this
//! module — the type system closed them off at the boundary.
//!
//! User text only ever enters the expression as a quoted, escaped string
//! literal. Nothing the user types can alter clause structure.

use crate::types::{FilterSelection, QueryKind, SortKey};

/// A compiled backend request fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// ANDed boolean predicate over document attributes, if any clause applies.
    pub filter: Option<String>,
    /// Ordered sort directive, `None` for the backend's relevance default.
    pub sort: Option<Vec<String>>,
}

/// Compile the session's search parameters into backend terms.
///
/// In [`QueryKind::Tag`] mode the query string becomes an exact-match clause
/// on the `tags` attribute; the caller must then send an empty free-text
/// query to the backend, not the tag value.
pub fn compile(
    query: &str,
    kind: QueryKind,
    filters: &FilterSelection,
    sort: SortKey,
) -> CompiledQuery {
    let mut clauses: Vec<String> = Vec::new();

    if kind == QueryKind::Tag {
        clauses.push(format!("tags = \"{}\"", escape(query)));
    }

    if let Some(label) = filters.active_label(crate::types::FilterKey::Format) {
        clauses.push(format!("ext = \"{}\"", escape(label)));
    }

    if let Some(ceiling) = filters.rating.and_then(|r| r.ceiling()) {
        clauses.push(format!("content_rating <= {ceiling}"));
    }

    if let Some(size) = filters.size {
        let (lo, hi) = size.bounds();
        if let Some(lo) = lo {
            clauses.push(format!("file_size >= {lo}"));
        }
        if let Some(hi) = hi {
            clauses.push(format!("file_size < {hi}"));
        }
    }

    if let Some(words) = filters.words {
        let (lo, hi) = words.bounds();
        if let Some(lo) = lo {
            clauses.push(format!("word_count >= {lo}"));
        }
        if let Some(hi) = hi {
            clauses.push(format!("word_count < {hi}"));
        }
    }

    let filter = if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    };

    CompiledQuery {
        filter,
        sort: sort_directive(sort),
    }
}

/// Fixed sort table. `Best` defers to the backend's relevance ranking.
pub fn sort_directive(sort: SortKey) -> Option<Vec<String>> {
    match sort {
        SortKey::Best => None,
        SortKey::Hot => Some(vec!["downloads:desc".to_string()]),
        SortKey::New => Some(vec!["created_at:desc".to_string()]),
        SortKey::Big => Some(vec!["file_size:desc".to_string()]),
    }
}

/// Escape a string operand for the backend's expression syntax.
/// Backslashes first, then double quotes.
fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ContentRating, FilterKey, FilterValue, FormatFilter, SizeBand, WordBand,
    };
    use pretty_assertions::assert_eq;

    fn filters(values: &[FilterValue]) -> FilterSelection {
        let mut sel = FilterSelection::default();
        for v in values {
            sel.set(*v);
        }
        sel
    }

    #[test]
    fn empty_selection_compiles_to_nothing() {
        let out = compile("三体", QueryKind::Text, &FilterSelection::default(), SortKey::Best);
        assert_eq!(out.filter, None);
        assert_eq!(out.sort, None);
    }

    #[test]
    fn tag_mode_emits_exact_tag_clause() {
        let out = compile("科幻", QueryKind::Tag, &FilterSelection::default(), SortKey::Best);
        assert_eq!(out.filter.as_deref(), Some("tags = \"科幻\""));
    }

    #[test]
    fn tag_value_is_escaped() {
        let out = compile(
            r#"a" OR ext = "PDF"#,
            QueryKind::Tag,
            &FilterSelection::default(),
            SortKey::Best,
        );
        // The whole query stays inside one string literal.
        assert_eq!(
            out.filter.as_deref(),
            Some(r#"tags = "a\" OR ext = \"PDF""#)
        );
    }

    #[test]
    fn rating_ceiling_clauses() {
        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Rating(ContentRating::R15)]),
            SortKey::Best,
        );
        assert_eq!(out.filter.as_deref(), Some("content_rating <= 1"));

        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Rating(ContentRating::All)]),
            SortKey::Best,
        );
        assert_eq!(out.filter, None, "ALL rating emits no clause");
    }

    #[test]
    fn size_over_50mb_has_lower_bound_only() {
        // >50MB emits the 50 MiB lower bound and no upper bound.
        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Size(SizeBand::Over50)]),
            SortKey::Best,
        );
        let expr = out.filter.unwrap();
        assert_eq!(expr, "file_size >= 52428800");
    }

    #[test]
    fn size_band_emits_both_bounds() {
        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Size(SizeBand::From5To20)]),
            SortKey::Best,
        );
        assert_eq!(
            out.filter.as_deref(),
            Some("file_size >= 5242880 AND file_size < 20971520")
        );
    }

    #[test]
    fn word_band_clauses() {
        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Words(WordBand::Under100k)]),
            SortKey::Best,
        );
        assert_eq!(out.filter.as_deref(), Some("word_count < 100000"));
    }

    #[test]
    fn clauses_join_in_fixed_order() {
        let sel = filters(&[
            FilterValue::Words(WordBand::Over1m),
            FilterValue::Rating(ContentRating::G),
            FilterValue::Format(FormatFilter::Epub),
        ]);
        let out = compile("tagval", QueryKind::Tag, &sel, SortKey::Best);
        assert_eq!(
            out.filter.as_deref(),
            Some(
                "tags = \"tagval\" AND ext = \"EPUB\" AND content_rating <= 0 \
                 AND word_count >= 1000000"
            )
        );
    }

    #[test]
    fn format_all_emits_no_clause() {
        let out = compile(
            "q",
            QueryKind::Text,
            &filters(&[FilterValue::Format(FormatFilter::All)]),
            SortKey::Best,
        );
        assert_eq!(out.filter, None);
    }

    #[test]
    fn sort_table() {
        assert_eq!(sort_directive(SortKey::Best), None);
        assert_eq!(
            sort_directive(SortKey::Hot),
            Some(vec!["downloads:desc".to_string()])
        );
        assert_eq!(
            sort_directive(SortKey::New),
            Some(vec!["created_at:desc".to_string()])
        );
        assert_eq!(
            sort_directive(SortKey::Big),
            Some(vec!["file_size:desc".to_string()])
        );
    }

    #[test]
    fn compilation_is_deterministic() {
        let sel = filters(&[
            FilterValue::Size(SizeBand::From20To50),
            FilterValue::Rating(ContentRating::R18),
        ]);
        let a = compile("query", QueryKind::Text, &sel, SortKey::Hot);
        let b = compile("query", QueryKind::Text, &sel, SortKey::Hot);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_selections_compile_distinctly() {
        // Every single-value selection must yield a unique expression.
        let mut seen = std::collections::HashSet::new();
        let mut selections: Vec<FilterSelection> = vec![FilterSelection::default()];
        for rating in [ContentRating::G, ContentRating::R15, ContentRating::R18] {
            selections.push(filters(&[FilterValue::Rating(rating)]));
        }
        for size in SizeBand::ALL_OPTIONS {
            selections.push(filters(&[FilterValue::Size(size)]));
        }
        for words in WordBand::ALL_OPTIONS {
            selections.push(filters(&[FilterValue::Words(words)]));
        }
        for format in [FormatFilter::Pdf, FormatFilter::Epub, FormatFilter::Txt] {
            selections.push(filters(&[FilterValue::Format(format)]));
        }
        for sel in &selections {
            let out = compile("q", QueryKind::Text, sel, SortKey::Best);
            assert!(
                seen.insert(out.filter.clone()),
                "duplicate expression for {sel:?}: {:?}",
                out.filter
            );
        }
        assert_eq!(
            FilterKey::ALL.len(),
            4,
            "extend this test when adding filter keys"
        );
    }
}
