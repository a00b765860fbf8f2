//! Merge requests view

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{filter_line, muted_line, position, top_line, truncate};
use crate::model::MergeRequest;
use crate::screens::MergeRequestsScreen;
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selectable_row;

fn merge_request_row(mr: &MergeRequest, selected: bool) -> Line<'static> {
    let t = theme();
    let color = t.mr_state_color(mr.state);
    let mut spans = vec![
        Span::raw(format!(
            "{:<16} !{:<6} {:<20} ",
            truncate(mr.short_project_name(), 16),
            mr.iid,
            truncate(&mr.source_branch, 20),
        )),
        Span::styled(format!("{} ", mr.state.symbol()), Style::default().fg(color)),
    ];
    if mr.draft {
        spans.push(Span::styled("[Draft] ", t.muted_style()));
    }
    spans.push(Span::styled(
        format!("{:<10} ", mr.state.as_str()),
        Style::default().fg(color),
    ));
    spans.push(Span::styled(
        format!("@{:<12} ", truncate(&mr.author, 12)),
        t.muted_style(),
    ));
    spans.push(Span::raw(truncate(&mr.title, 40)));
    selectable_row(selected, spans, t)
}

/// Render the merge requests of all tracked projects
pub fn render_merge_requests(
    frame: &mut Frame,
    area: Rect,
    screen: &MergeRequestsScreen,
    loading_status: Option<&str>,
) {
    let total = screen.visible_len();
    let list = screen.list();

    let info = if total > 0 {
        position(list, total)
    } else {
        String::new()
    };
    let mut lines = vec![top_line(filter_line(screen.filter()), info, area.width)];

    if total == 0 {
        let message = if !screen.is_loaded() {
            loading_status.unwrap_or("Loading merge requests...")
        } else if screen.all().is_empty() {
            "No open merge requests"
        } else {
            "No merge requests match filter"
        };
        lines.push(muted_line(message));
    } else {
        let range = list.visible_range(total);
        lines.extend(
            screen
                .visible()
                .enumerate()
                .skip(range.start)
                .take(range.len())
                .map(|(idx, mr)| merge_request_row(mr, idx == list.cursor())),
        );
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MrState;

    #[test]
    fn test_draft_marker_and_truncated_title() {
        let mr = MergeRequest {
            id: 100,
            iid: 5,
            project_id: 1,
            project_path: "group/api".to_string(),
            title: "x".repeat(50),
            description: String::new(),
            state: MrState::Opened,
            author: "alice".to_string(),
            source_branch: "feature".to_string(),
            target_branch: "main".to_string(),
            merge_status: "can_be_merged".to_string(),
            draft: true,
            web_url: String::new(),
            created_at: None,
            updated_at: None,
        };
        let row = merge_request_row(&mr, false);
        let text: String = row.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.contains("!5"));
        assert!(text.contains("[Draft]"));
        assert!(text.contains("@alice"));
        assert!(text.ends_with(&format!("{}...", "x".repeat(37))));
    }
}
