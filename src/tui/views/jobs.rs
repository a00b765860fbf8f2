//! Jobs view

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{muted_line, position, top_line, truncate};
use crate::model::{Job, Pipeline};
use crate::screens::{job_hint, JobsScreen};
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selectable_row;

fn job_row(job: &Job, selected: bool) -> Line<'static> {
    let t = theme();
    let color = t.job_status_color(job.status);
    let duration = job
        .duration
        .filter(|d| *d > 0.0)
        .map(|d| format!("{:.0}s", d))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(format!("{:<10} ", truncate(&job.stage, 10)), t.muted_style()),
        Span::styled(format!("{} ", job.status.symbol()), Style::default().fg(color)),
        Span::raw(format!("{:<24} ", truncate(&job.name, 24))),
        Span::styled(format!("{:<10} ", job.status.as_str()), Style::default().fg(color)),
        Span::raw(format!("{:>6}", duration)),
    ];
    if let Some(hint) = job_hint(job) {
        spans.push(Span::styled(format!(" {}", hint), t.key_style()));
    }
    selectable_row(selected, spans, t)
}

/// Render the jobs of the selected pipeline
pub fn render_jobs(frame: &mut Frame, area: Rect, screen: &JobsScreen, pipeline: Option<&Pipeline>) {
    let t = theme();
    let jobs = screen.jobs();
    let list = screen.list();

    let title = pipeline
        .map(|p| {
            Line::from(Span::styled(
                format!("  Pipeline #{} ({})", p.id, p.git_ref),
                t.header_style(),
            ))
        });
    let info = if jobs.is_empty() {
        String::new()
    } else {
        position(list, jobs.len())
    };
    let mut lines = vec![top_line(title, info, area.width)];

    if jobs.is_empty() {
        let message = if screen.is_loaded() {
            "No jobs"
        } else {
            "Loading jobs..."
        };
        lines.push(muted_line(message));
    } else {
        let range = list.visible_range(jobs.len());
        lines.extend(
            jobs[range.clone()]
                .iter()
                .zip(range)
                .map(|(job, idx)| job_row(job, idx == list.cursor())),
        );
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobStatus;

    fn job(status: JobStatus, duration: Option<f64>) -> Job {
        Job {
            id: 42,
            pipeline_id: 7,
            project_id: 1,
            name: "test".to_string(),
            stage: "build".to_string(),
            status,
            duration,
            started_at: None,
            finished_at: None,
            web_url: String::new(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_failed_job_shows_retry_hint() {
        let row = job_row(&job(JobStatus::Failed, Some(12.4)), false);
        let row = text(&row);
        assert!(row.contains("12s"));
        assert!(row.ends_with("[r:retry]"));
    }

    #[test]
    fn test_running_job_shows_cancel_hint() {
        let row = text(&job_row(&job(JobStatus::Running, None), false));
        assert!(row.ends_with("[c:cancel]"));
    }

    #[test]
    fn test_success_job_has_no_hint() {
        let row = text(&job_row(&job(JobStatus::Success, None), false));
        assert!(!row.contains('['));
    }
}
