//! Projects view, including the add-project search box

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{muted_line, position, top_line, truncate};
use crate::model::Project;
use crate::screens::{ProjectSearch, ProjectsScreen};
use crate::tui::theme::theme;
use crate::tui::widgets::selection::selectable_row;

fn project_row(project: &Project, selected: bool) -> Line<'static> {
    let t = theme();
    let active_style = if project.active_count > 0 {
        Style::default().fg(t.status_running)
    } else {
        t.muted_style()
    };
    selectable_row(
        selected,
        vec![
            Span::raw(format!("{:<40} ", truncate(&project.path_with_namespace, 40))),
            Span::styled(format!("{} pipelines  ", project.pipeline_count), t.muted_style()),
            Span::styled(format!("{} active", project.active_count), active_style),
        ],
        t,
    )
}

fn search_lines(search: &ProjectSearch, width: u16) -> Vec<Line<'static>> {
    let t = theme();
    let prompt = Line::from(vec![
        Span::styled("  Add project: ", t.key_style()),
        Span::raw(search.query.clone()),
        Span::styled("█", t.input_style()),
    ]);
    let info = if search.results.is_empty() {
        String::new()
    } else {
        position(&search.list, search.results.len())
    };
    let mut lines = vec![top_line(Some(prompt), info, width)];

    if search.results.is_empty() {
        let message = if search.query.chars().count() < 2 {
            "Type at least 2 characters to search"
        } else {
            "No matching projects"
        };
        lines.push(muted_line(message));
    } else {
        let range = search.list.visible_range(search.results.len());
        lines.extend(
            search.results[range.clone()]
                .iter()
                .zip(range)
                .map(|(p, idx)| {
                    selectable_row(
                        idx == search.list.cursor(),
                        vec![Span::raw(p.path_with_namespace.clone())],
                        t,
                    )
                }),
        );
    }
    lines
}

/// Render tracked projects, or the search box while adding one
pub fn render_projects(frame: &mut Frame, area: Rect, screen: &ProjectsScreen) {
    let lines = match screen.search() {
        Some(search) => search_lines(search, area.width),
        None => {
            let projects = screen.projects();
            let list = screen.list();
            let info = if projects.is_empty() {
                String::new()
            } else {
                position(list, projects.len())
            };
            let mut lines = vec![top_line(None, info, area.width)];
            if projects.is_empty() {
                let message = if screen.is_loaded() {
                    "No projects tracked. Press a to add one."
                } else {
                    "Loading projects..."
                };
                lines.push(muted_line(message));
            } else {
                let range = list.visible_range(projects.len());
                lines.extend(
                    projects[range.clone()]
                        .iter()
                        .zip(range)
                        .map(|(p, idx)| project_row(p, idx == list.cursor())),
                );
            }
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_project_row_counters() {
        let project = Project {
            id: 1,
            name: "a".to_string(),
            path_with_namespace: "g/a".to_string(),
            web_url: String::new(),
            pipeline_count: 12,
            active_count: 2,
        };
        let row = text(&project_row(&project, false));
        assert!(row.starts_with("  g/a"));
        assert!(row.ends_with("12 pipelines  2 active"));
    }

    #[test]
    fn test_short_query_prompts_for_more() {
        let search = ProjectSearch {
            query: "g".to_string(),
            ..Default::default()
        };
        let lines = search_lines(&search, 60);
        assert!(text(&lines[0]).contains("Add project: g█"));
        assert!(text(&lines[1]).contains("at least 2 characters"));
    }
}
