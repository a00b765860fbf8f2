//! Scrollable text views: job log and merge request detail

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::{muted_line, top_line};
use crate::screens::{LogScreen, MrDetailScreen, ScrollText};
use crate::tui::theme::theme;

fn scroll_info(text: &ScrollText) -> String {
    let total = text.lines().len();
    if total == 0 {
        return String::new();
    }
    let first = text.scroll() + 1;
    let last = text.scroll() + text.visible().len();
    format!("{}-{} of {}", first, last, total)
}

fn render_scroll_text(frame: &mut Frame, area: Rect, title: Option<Line<'static>>, text: &ScrollText) {
    let t = theme();
    let mut lines = vec![top_line(title, scroll_info(text), area.width)];
    lines.extend(
        text.visible()
            .iter()
            .map(|l| Line::from(Span::styled(l.text.clone(), t.line_style(l.kind)))),
    );
    frame.render_widget(Paragraph::new(lines), area);

    let body_height = area.height.saturating_sub(1) as usize;
    let total = text.lines().len();
    if total > body_height && area.height > 1 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut state = ScrollbarState::new(total)
            .position(text.scroll())
            .viewport_content_length(body_height);
        let scrollbar_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut state);
    }
}

/// Render the trace of the selected job
pub fn render_log(frame: &mut Frame, area: Rect, screen: &LogScreen) {
    if !screen.is_loaded() {
        frame.render_widget(Paragraph::new(vec![Line::from(""), muted_line("Loading log...")]), area);
        return;
    }
    let title = Line::from(Span::styled(
        format!("  Log: {}", screen.job_name()),
        theme().header_style(),
    ));
    render_scroll_text(frame, area, Some(title), screen.text());
}

/// Render the selected merge request with its diff or comments tab
pub fn render_mr_detail(frame: &mut Frame, area: Rect, screen: &MrDetailScreen) {
    if screen.merge_request().is_none() {
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), muted_line("Loading merge request...")]),
            area,
        );
        return;
    }
    render_scroll_text(frame, area, None, screen.text());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_scroll_info_empty() {
        assert_eq!(scroll_info(&ScrollText::default()), "");
    }

    #[test]
    fn test_log_renders_tail() {
        let mut screen = LogScreen::default();
        screen.open(42, "test");
        screen.set_terminal_height(10);
        let raw: String = (1..=30).map(|i| format!("line {}\n", i)).collect();
        screen.set_content(&raw);

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|frame| render_log(frame, frame.size(), &screen))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let first: String = (0..40).map(|x| buffer.get(x, 0).symbol()).collect();
        assert!(first.contains("Log: test"));
        assert!(first.contains("of 30"));
        let last: String = (0..38).map(|x| buffer.get(x, 4).symbol()).collect();
        assert!(last.contains("line"));
    }

    #[test]
    fn test_log_loading_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|frame| render_log(frame, frame.size(), &LogScreen::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buffer.get(x, 1).symbol()).collect();
        assert!(row.contains("Loading log..."));
    }
}
