//! Layout engine — turns logical actions into a bounded button grid.
//!
//! Two modes share the primitives here: the **default** result grid (quick
//! page row, filter row, sort row, banded result buttons, navigation row)
//! and the **page picker** (a 10-page window for arbitrary jumps). The
//! filter-menu grid reuses the same row-banding primitive.
//!
//! Buttons carry their action as the encoded wire token (see
//! [`crate::action`]); the engine itself has no side effects.

use crate::action::Action;
use crate::types::{FilterKey, FilterSelection, FilterValue, SortKey};
use crate::types::{ContentRating, FormatFilter, SizeBand, WordBand};

/// One actionable (or inert) button in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Encoded action token, echoed back verbatim by the transport.
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Button {
            label: label.into(),
            action: action.encode(),
        }
    }

    /// Inert placeholder keeping a fixed-width row aligned.
    pub fn placeholder() -> Self {
        Button::new("·", Action::Noop)
    }
}

/// Rows of buttons, outer list = rows top to bottom.
pub type Grid = Vec<Vec<Button>>;

/// Which grid [`layout`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Default,
    PagePicker,
}

/// Everything the engine needs to lay out one rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState<'a> {
    /// Current page, 0-based.
    pub page: u32,
    pub total_pages: u32,
    /// Document ids of the hits on this page, in display order.
    pub hit_ids: &'a [u64],
    pub sort: SortKey,
    pub filters: &'a FilterSelection,
}

/// Build the control grid for `mode`.
pub fn layout(mode: LayoutMode, state: &GridState<'_>) -> Grid {
    match mode {
        LayoutMode::Default => default_grid(state),
        LayoutMode::PagePicker => page_picker_grid(state.page, state.total_pages),
    }
}

// ---------------------------------------------------------------------------
// Row banding
// ---------------------------------------------------------------------------

/// Row sizes drawn greedily from the repeating candidate sequence 3, 4, 3
/// until `n` items are placed. The sizes always sum to exactly `n`.
pub fn band_rows(n: usize) -> Vec<usize> {
    const BAND: [usize; 3] = [3, 4, 3];
    let mut sizes = Vec::new();
    let mut remaining = n;
    let mut slot = 0;
    while remaining > 0 {
        let take = BAND[slot % BAND.len()].min(remaining);
        sizes.push(take);
        remaining -= take;
        slot += 1;
    }
    sizes
}

/// Split `items` into rows per [`band_rows`].
fn band<T>(items: Vec<T>) -> Vec<Vec<T>> {
    let sizes = band_rows(items.len());
    let mut items = items.into_iter();
    sizes
        .into_iter()
        .map(|size| items.by_ref().take(size).collect())
        .collect()
}

/// Split `items` into rows of the given explicit sizes; any overflow goes
/// into a final row. Used by the filter menus, whose option counts have
/// per-key layouts.
fn rows_of<T>(items: Vec<T>, sizes: &[usize]) -> Vec<Vec<T>> {
    let mut rows = Vec::new();
    let mut items = items.into_iter().peekable();
    for &size in sizes {
        if items.peek().is_none() {
            break;
        }
        rows.push(items.by_ref().take(size).collect());
    }
    if items.peek().is_some() {
        rows.push(items.collect());
    }
    rows
}

// ---------------------------------------------------------------------------
// Default grid
// ---------------------------------------------------------------------------

fn default_grid(state: &GridState<'_>) -> Grid {
    let mut grid: Grid = Vec::new();

    if state.total_pages > 1 {
        grid.push(quick_page_row(state.page, state.total_pages));
    }

    grid.push(filter_row(state.filters));
    grid.push(sort_row(state.sort));

    let result_buttons: Vec<Button> = state
        .hit_ids
        .iter()
        .enumerate()
        .map(|(i, id)| Button::new((i + 1).to_string(), Action::Select(*id)))
        .collect();
    grid.extend(band(result_buttons));

    grid.push(nav_row(state.page, state.total_pages));
    grid
}

/// Current page (page-picker trigger), up to 5 following pages, and an
/// ellipsis jump to the last page when more remain beyond the window.
fn quick_page_row(page: u32, total_pages: u32) -> Vec<Button> {
    let mut row = vec![Button::new(format!("{}▾", page + 1), Action::PageSelect)];
    for p in (page + 1)..(page + 6).min(total_pages) {
        row.push(Button::new((p + 1).to_string(), Action::Page(p)));
    }
    if total_pages > page + 6 {
        row.push(Button::new(
            format!("...{total_pages}"),
            Action::Jump(total_pages - 1),
        ));
    }
    row
}

/// Fixed 4-button row of filter-menu triggers, each decorated with the
/// active value when one is set (the ALL sentinel counts as unset).
fn filter_row(filters: &FilterSelection) -> Vec<Button> {
    [
        (FilterKey::Rating, "分级"),
        (FilterKey::Format, "格式"),
        (FilterKey::Size, "体积"),
        (FilterKey::Words, "字数"),
    ]
    .into_iter()
    .map(|(key, name)| {
        let label = match filters.active_label(key) {
            Some(value) => format!("{name}:{value}▾"),
            None => format!("{name}▾"),
        };
        Button::new(label, Action::FilterMenu(key))
    })
    .collect()
}

/// Fixed 4-button row of sort triggers; the active one is marked.
fn sort_row(sort: SortKey) -> Vec<Button> {
    [
        (SortKey::Best, "最佳"),
        (SortKey::Hot, "最热"),
        (SortKey::New, "最新"),
        (SortKey::Big, "最大"),
    ]
    .into_iter()
    .map(|(key, name)| {
        let label = if key == sort {
            format!("{name}↓")
        } else {
            name.to_string()
        };
        Button::new(label, Action::Sort(key))
    })
    .collect()
}

/// Final 5-button row: previous page, page/total indicator, next page,
/// settings, close. Edges get inert placeholders so the row width is fixed.
fn nav_row(page: u32, total_pages: u32) -> Vec<Button> {
    let prev = if page > 0 {
        Button::new("<", Action::Page(page - 1))
    } else {
        Button::placeholder()
    };
    let next = if page + 1 < total_pages {
        Button::new(">", Action::Page(page + 1))
    } else {
        Button::placeholder()
    };
    vec![
        prev,
        Button::new(format!("{}/{}", page + 1, total_pages), Action::Noop),
        next,
        Button::new("⚙️", Action::Settings),
        Button::new("❌", Action::Close),
    ]
}

// ---------------------------------------------------------------------------
// Page picker
// ---------------------------------------------------------------------------

const PICKER_WINDOW: u32 = 10;

/// Grid restricted to the 10-page window containing `page`, plus a window
/// navigation row.
fn page_picker_grid(page: u32, total_pages: u32) -> Grid {
    let window_start = (page / PICKER_WINDOW) * PICKER_WINDOW;
    let window_end = (window_start + PICKER_WINDOW).min(total_pages);

    let page_buttons: Vec<Button> = (window_start..window_end)
        .map(|p| {
            let label = if p == page {
                format!("·{}·", p + 1)
            } else {
                (p + 1).to_string()
            };
            Button::new(label, Action::Page(p))
        })
        .collect();

    let mut grid = band(page_buttons);
    grid.push(picker_nav_row(page, total_pages, window_start, window_end));
    grid
}

fn picker_nav_row(page: u32, total_pages: u32, window_start: u32, window_end: u32) -> Vec<Button> {
    let prev = if window_start > 0 {
        Button::new("«", Action::Jump(window_start - PICKER_WINDOW))
    } else {
        Button::placeholder()
    };
    let next = if window_end < total_pages {
        // Land on the first page of the next window.
        Button::new("»", Action::Jump(window_end.min(total_pages.saturating_sub(1))))
    } else {
        Button::placeholder()
    };
    vec![
        prev,
        Button::new(format!("{}/{}", page + 1, total_pages), Action::Noop),
        next,
        Button::new("返回", Action::BackToSearch),
        Button::new("❌", Action::Close),
    ]
}

// ---------------------------------------------------------------------------
// Filter menu
// ---------------------------------------------------------------------------

/// Option grid for one filter dimension: every value in the key's domain
/// (current selection marked), then a control row with clear / back / close.
pub fn filter_menu_grid(key: FilterKey, filters: &FilterSelection) -> Grid {
    let current = filters.get(key);
    let option_button = |value: FilterValue| {
        let name = match value {
            FilterValue::Rating(ContentRating::G) => "全年龄",
            _ => match value.as_str() {
                "ALL" => "全部",
                other => other,
            },
        };
        let label = if current == Some(value) {
            format!("·{name}·")
        } else {
            name.to_string()
        };
        Button::new(label, Action::FilterSet(value))
    };

    let (options, sizes): (Vec<Button>, &[usize]) = match key {
        FilterKey::Rating => (
            [
                ContentRating::All,
                ContentRating::G,
                ContentRating::R15,
                ContentRating::R18,
            ]
            .into_iter()
            .map(|v| option_button(FilterValue::Rating(v)))
            .collect(),
            &[2, 2],
        ),
        FilterKey::Format => (
            FormatFilter::ALL_OPTIONS
                .into_iter()
                .map(|v| option_button(FilterValue::Format(v)))
                .collect(),
            &[3, 3],
        ),
        // Size and word bands have no ALL sentinel in their domain; the
        // "everything" option clears the filter instead.
        FilterKey::Size => (
            std::iter::once(Button::new(all_label(current), Action::FilterClear(key)))
                .chain(
                    SizeBand::ALL_OPTIONS
                        .into_iter()
                        .map(|v| option_button(FilterValue::Size(v))),
                )
                .collect(),
            &[3, 2],
        ),
        FilterKey::Words => (
            std::iter::once(Button::new(all_label(current), Action::FilterClear(key)))
                .chain(
                    WordBand::ALL_OPTIONS
                        .into_iter()
                        .map(|v| option_button(FilterValue::Words(v))),
                )
                .collect(),
            &[3, 2],
        ),
    };

    fn all_label(current: Option<FilterValue>) -> String {
        if current.is_none() {
            "·全部·".to_string()
        } else {
            "全部".to_string()
        }
    }

    let mut grid = rows_of(options, sizes);
    grid.push(vec![
        Button::new("清除", Action::FilterClear(key)),
        Button::placeholder(),
        Button::placeholder(),
        Button::new("返回", Action::BackToSearch),
        Button::new("❌", Action::Close),
    ]);
    grid
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
