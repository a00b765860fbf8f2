//! Commits view

use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{muted_line, position, top_line, truncate};
use crate::model::{time_ago, Commit};
use crate::screens::CommitsScreen;
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selectable_row;

fn commit_row(commit: &Commit, selected: bool) -> Line<'static> {
    let t = theme();
    let age = commit
        .created_at
        .map(|at| time_ago(at, Utc::now()))
        .unwrap_or_default();
    selectable_row(
        selected,
        vec![
            Span::styled(commit.short_id.clone(), t.key_style()),
            Span::raw(format!("  {:<20}  ", truncate(&commit.author_name, 20))),
            Span::raw(truncate(&commit.title, 60)),
            Span::styled(format!("  {}", age), t.muted_style()),
        ],
        t,
    )
}

/// Render the commits on the selected pipeline's ref
pub fn render_commits(frame: &mut Frame, area: Rect, screen: &CommitsScreen) {
    let t = theme();
    let commits = screen.commits();
    let list = screen.list();

    let title = Line::from(Span::styled(
        format!("  Commits: {}", screen.git_ref()),
        t.header_style(),
    ));
    let info = if commits.is_empty() {
        String::new()
    } else {
        position(list, commits.len())
    };
    let mut lines = vec![top_line(Some(title), info, area.width)];

    if commits.is_empty() {
        let message = if screen.is_loaded() {
            "No commits"
        } else {
            "Loading commits..."
        };
        lines.push(muted_line(message));
    } else {
        let range = list.visible_range(commits.len());
        lines.extend(
            commits[range.clone()]
                .iter()
                .zip(range)
                .map(|(c, idx)| commit_row(c, idx == list.cursor())),
        );
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_row() {
        let commit = Commit {
            short_id: "abc1234".to_string(),
            title: "Fix the build".to_string(),
            author_name: "Alice".to_string(),
            author_email: "alice@example.com".to_string(),
            created_at: None,
            web_url: String::new(),
        };
        let row = commit_row(&commit, true);
        let text: String = row.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("▸ abc1234  Alice"));
        assert!(text.contains("Fix the build"));
    }
}
