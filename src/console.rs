//! Line-oriented console front end.
//!
//! The engine's real transport is a messaging surface; this console stands
//! in for it during development. Plain input runs a text search, `#tag`
//! runs a tag search, and `:token` replays a button token exactly as a
//! transport callback would.

use crate::orchestrator::{Orchestrator, Outcome, RenderPayload};
use biblio_core::layout::Grid;
use biblio_core::types::QueryKind;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Read lines from stdin until EOF, dispatching each to the orchestrator.
pub async fn run(orchestrator: Orchestrator, user: u64) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();

    out.write_all(b"biblio console \xe2\x80\x94 type a query, #tag, or :token\n> ")
        .await?;
    out.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            out.write_all(b"> ").await?;
            out.flush().await?;
            continue;
        }

        let outcome = if let Some(token) = line.strip_prefix(':') {
            orchestrator.act(user, token).await
        } else if let Some(tag) = line.strip_prefix('#') {
            orchestrator.search(user, tag, QueryKind::Tag).await
        } else {
            orchestrator.search(user, line, QueryKind::Text).await
        };

        out.write_all(describe(&outcome).as_bytes()).await?;
        out.write_all(b"\n> ").await?;
        out.flush().await?;
    }
    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Results(RenderPayload { text, grid }) => {
            format!("{text}\n\n{}", render_grid(grid))
        }
        Outcome::FilterMenu(grid) => render_grid(grid),
        Outcome::NoResults => "没有找到结果。换个关键词或放宽筛选试试。".to_string(),
        Outcome::SessionExpired => "搜索已过期，请重新输入关键词。".to_string(),
        Outcome::Unavailable => "服务暂时不可用，请稍后再试。".to_string(),
        Outcome::Invalid(reason) => format!("(unrecognised token: {reason})"),
        Outcome::Selected(id) => format!("(selected document {id})"),
        Outcome::Settings => "(settings surface — not part of the console)".to_string(),
        Outcome::Close => "(closed)".to_string(),
        Outcome::Noop => "(noop)".to_string(),
    }
}

/// One line per row, each button as `[label](:token)` so it can be pasted
/// back in.
fn render_grid(grid: &Grid) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|b| format!("[{}](:{})", b.label, b.action))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::action::Action;
    use biblio_core::layout::Button;

    #[test]
    fn grid_rows_render_as_pastable_tokens() {
        let grid: Grid = vec![
            vec![Button::new("1", Action::Select(42)), Button::placeholder()],
            vec![Button::new("❌", Action::Close)],
        ];
        assert_eq!(render_grid(&grid), "[1](:sel:42) [·](:noop)\n[❌](:close)");
    }

    #[test]
    fn terminal_outcomes_have_messages() {
        assert!(describe(&Outcome::NoResults).contains("没有找到结果"));
        assert!(describe(&Outcome::SessionExpired).contains("过期"));
        assert!(describe(&Outcome::Unavailable).contains("不可用"));
    }
}
