//! Paginator — page counts, offsets, and display index ranges.
//!
//! Pure arithmetic, no clamping: an out-of-range page simply frames zero
//! returned hits, which the orchestrator reports as "no results" rather
//! than an error.

/// Framing of one result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFrame {
    /// `ceil(total_hits / page_size)`; 0 when there are no hits at all.
    pub total_pages: u32,
    /// Absolute offset of the first slot on this page.
    pub offset: u64,
    /// 1-based display index of the first returned hit.
    pub start_index: u64,
    /// 1-based display index of the last returned hit; `offset` when the
    /// page returned nothing.
    pub end_index: u64,
}

/// Frame `returned` hits out of `total_hits` at `page` (0-based).
///
/// `page_size` must be positive; that is a programmer error, not a
/// user-facing failure.
pub fn frame(total_hits: u64, page: u32, page_size: u32, returned: usize) -> PageFrame {
    debug_assert!(page_size > 0, "page_size must be positive");
    debug_assert!(returned as u64 <= page_size as u64);

    let page_size = u64::from(page_size.max(1));
    let total_pages = total_hits.div_ceil(page_size).min(u64::from(u32::MAX)) as u32;
    let offset = u64::from(page) * page_size;

    PageFrame {
        total_pages,
        offset,
        start_index: offset + 1,
        end_index: offset + returned as u64,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
