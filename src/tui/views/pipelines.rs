//! Pipelines view

use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{filter_line, muted_line, position, top_line, truncate};
use crate::model::{time_ago, Pipeline};
use crate::screens::PipelinesScreen;
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selectable_row;

pub(crate) fn pipeline_row(pipeline: &Pipeline, selected: bool) -> Line<'static> {
    let t = theme();
    let color = t.pipeline_status_color(pipeline.status);
    selectable_row(
        selected,
        vec![
            Span::raw(format!(
                "{:<16} #{:<8} {:<16} ",
                truncate(pipeline.short_project_name(), 16),
                pipeline.id,
                truncate(&pipeline.git_ref, 16),
            )),
            Span::styled(
                format!("{} {:<12}", pipeline.status.symbol(), pipeline.status.as_str()),
                Style::default().fg(color),
            ),
            Span::styled(
                format!(" {}", time_ago(pipeline.created_at, Utc::now())),
                t.muted_style(),
            ),
        ],
        t,
    )
}

/// Render the aggregated pipeline list
pub fn render_pipelines(frame: &mut Frame, area: Rect, screen: &PipelinesScreen, limit: usize) {
    let total = screen.visible_len();
    let list = screen.list();

    let info = if total > 0 {
        format!("{}  limit:{}", position(list, total), limit)
    } else {
        format!("limit:{}", limit)
    };
    let mut lines = vec![top_line(filter_line(screen.filter()), info, area.width)];

    if total == 0 {
        let message = if !screen.is_loaded() {
            "Loading pipelines..."
        } else if screen.all().is_empty() {
            "No pipelines"
        } else {
            "No pipelines match filter"
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
                .map(|(idx, p)| pipeline_row(p, idx == list.cursor())),
        );
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PipelineStatus;

    #[test]
    fn test_pipeline_row_columns() {
        let pipeline = Pipeline {
            id: 7,
            project_id: 1,
            project_path: "group/api".to_string(),
            git_ref: "main".to_string(),
            status: PipelineStatus::Failed,
            created_at: Utc::now(),
            duration: None,
            job_count: None,
        };
        let row = pipeline_row(&pipeline, true);
        let text: String = row.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.starts_with("▸ api"));
        assert!(text.contains("#7"));
        assert!(text.contains("✗ failed"));
        assert_eq!(row.spans[2].style.fg, Some(theme().status_failed));
    }
}
