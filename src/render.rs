//! Result-list text rendering.
//!
//! Produces the plain message body that accompanies the button grid: a
//! header with the display index range and total, then one block per hit.
//! Anything decorative (deep links, footers) belongs to the transport.

use biblio_core::page::PageFrame;
use biblio_core::types::SearchHit;

/// Human-readable file size, 1024-based.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    const GIB: u64 = 1024 * 1024 * 1024;
    if bytes < KIB {
        format!("{bytes}B")
    } else if bytes < MIB {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}GB", bytes as f64 / GIB as f64)
    }
}

/// Display width of a string, counting fullwidth CJK characters as two
/// columns. Good enough for title truncation; exact East Asian Width
/// tables are overkill here.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}'   // Hangul jamo
        | '\u{2E80}'..='\u{303E}' // CJK radicals, punctuation
        | '\u{3041}'..='\u{33FF}' // kana, compatibility
        | '\u{3400}'..='\u{4DBF}' // CJK ext A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified
        | '\u{A000}'..='\u{A4CF}' // Yi
        | '\u{AC00}'..='\u{D7A3}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}' // CJK compatibility
        | '\u{FE30}'..='\u{FE4F}' // vertical forms
        | '\u{FF00}'..='\u{FF60}' // fullwidth forms
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{20000}'..='\u{2FFFD}')
}

fn truncated_title(hit: &SearchHit) -> String {
    let title = hit
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&hit.file_name);
    if display_width(title) <= 30 {
        return title.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in title.chars() {
        width += if is_wide(c) { 2 } else { 1 };
        if width > 26 {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

/// One list entry: numbered title line, then a detail line.
fn result_line(index: u64, hit: &SearchHit) -> String {
    let ext = if hit.ext.is_empty() { "FILE" } else { &hit.ext };
    format!(
        "{index:02}. {}\n   · {ext} · {} · {}DL",
        truncated_title(hit),
        format_size(hit.file_size),
        hit.downloads,
    )
}

/// The full result-list body for one page.
pub fn result_list(hits: &[SearchHit], frame: &PageFrame, total_hits: u64) -> String {
    let header = format!(
        "🔍 搜索结果：第 {}-{} 条，共 {}",
        frame.start_index, frame.end_index, total_hits
    );
    let items: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| result_line(frame.start_index + i as u64, hit))
        .collect();
    format!("{header}\n\n{}", items.join("\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::page;

    fn hit(id: u64, title: &str, size: u64, downloads: u64) -> SearchHit {
        SearchHit {
            id,
            title: Some(title.to_string()),
            author: None,
            file_name: format!("{title}.epub"),
            file_size: size,
            ext: "EPUB".to_string(),
            word_count: None,
            content_rating: None,
            downloads,
            collections: None,
        }
    }

    #[test]
    fn size_units() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0GB");
    }

    #[test]
    fn cjk_counts_double_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("三体"), 4);
        assert_eq!(display_width("三体abc"), 7);
    }

    #[test]
    fn header_shows_index_range_and_total() {
        let hits = vec![hit(1, "三体", 1024, 3), hit(2, "球状闪电", 2048, 1)];
        let frame = page::frame(23, 1, 10, hits.len());
        let text = result_list(&hits, &frame, 23);
        assert!(text.starts_with("🔍 搜索结果：第 11-12 条，共 23"));
        assert!(text.contains("11. 三体"));
        assert!(text.contains("12. 球状闪电"));
        assert!(text.contains("· EPUB · 2.0KB · 1DL"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "一".repeat(40);
        let text = result_line(1, &hit(1, &long, 10, 0));
        let first_line = text.lines().next().unwrap();
        assert!(first_line.ends_with('…'));
        assert!(display_width(first_line) < 40);
    }

    #[test]
    fn missing_title_falls_back_to_file_name() {
        let mut h = hit(1, "t", 10, 0);
        h.title = None;
        h.file_name = "fallback.txt".to_string();
        assert!(result_line(1, &h).contains("fallback.txt"));
    }
}
