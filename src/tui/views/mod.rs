//! View rendering modules
//!
//! Each view in the application has its own module for rendering logic.
//! Views only read screen state; they never mutate it.

use ratatui::prelude::*;

use crate::screens::{ListCursor, TextFilter};
use crate::tui::theme::theme;

mod commits;
mod confirm;
mod jobs;
mod merge_requests;
mod mr_create;
mod pipelines;
mod projects;
mod text;

pub use commits::render_commits;
pub use confirm::render_confirm_dialog;
pub use jobs::render_jobs;
pub use merge_requests::render_merge_requests;
pub use mr_create::render_mr_create;
pub use pipelines::render_pipelines;
pub use projects::render_projects;
pub use text::{render_log, render_mr_detail};

/// Cut `text` to `max` characters, ending with "..." when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// "Filter: text" line; shows a caret while editing
pub(crate) fn filter_line(filter: &TextFilter) -> Option<Line<'static>> {
    let t = theme();
    if filter.is_editing() {
        Some(Line::from(vec![
            Span::styled("  Filter: ", t.key_style()),
            Span::raw(filter.text().to_string()),
            Span::styled("█", t.input_style()),
        ]))
    } else if !filter.text().is_empty() {
        Some(Line::from(vec![
            Span::styled("  Filter: ", t.key_style()),
            Span::styled(filter.text().to_string(), t.muted_style()),
        ]))
    } else {
        None
    }
}

/// Position of the cursor in a list, e.g. "3/40"
pub(crate) fn position(list: &ListCursor, total: usize) -> String {
    format!("{}/{}", list.cursor() + 1, total)
}

/// Muted, indented single-line message
pub(crate) fn muted_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(format!("  {}", text.into()), theme().muted_style()))
}

/// First content row: filter (if any) on the left, `info` on the right
pub(crate) fn top_line(filter: Option<Line<'static>>, info: String, width: u16) -> Line<'static> {
    let t = theme();
    let mut spans = filter.map(|l| l.spans).unwrap_or_default();
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let padding = (width as usize).saturating_sub(used + info.chars().count() + 1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(info, t.muted_style()));
    Line::from(spans)
}
