//! Merge request creation form

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::screens::{FormField, MrCreateScreen};
use crate::tui::theme::theme;

/// Suggestions shown under the focused field
const MAX_SUGGESTIONS: usize = 8;

fn field_line(screen: &MrCreateScreen, field: FormField) -> Line<'static> {
    let t = theme();
    let active = screen.cursor() == field;
    let marker = if active { "▸ " } else { "  " };
    let label_style = if active {
        t.key_style()
    } else {
        t.muted_style()
    };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<15}", format!("{}:", field.label())), label_style),
    ];
    if field == FormField::Draft {
        let check = if screen.draft() { "[x]" } else { "[ ]" };
        spans.push(Span::raw(check));
    } else {
        spans.push(Span::raw(screen.value(field).to_string()));
        if active {
            spans.push(Span::styled("█", t.input_style()));
        }
    }
    Line::from(spans)
}

fn suggestion_lines(screen: &MrCreateScreen) -> Vec<Line<'static>> {
    let t = theme();
    let suggestions = screen.suggestions();
    let selected = screen.suggestion_cursor();
    let start = selected.saturating_sub(MAX_SUGGESTIONS - 1);

    suggestions
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_SUGGESTIONS)
        .map(|(idx, s)| {
            if idx == selected {
                Line::from(vec![
                    Span::raw("                 "),
                    Span::styled(format!(" ▸ {}", s), t.header_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("                 "),
                    Span::styled(format!("   {}", s), t.muted_style()),
                ])
            }
        })
        .collect()
}

pub(crate) fn form_lines(screen: &MrCreateScreen) -> Vec<Line<'static>> {
    let t = theme();
    let mut lines = vec![
        Line::from(Span::styled("  Create Merge Request", t.header_style())),
        Line::from(""),
    ];

    for field in FormField::ALL {
        lines.push(field_line(screen, field));
        if screen.cursor() == field {
            lines.extend(suggestion_lines(screen));
        }
    }

    lines.push(Line::from(""));
    if let Some(error) = screen.error() {
        lines.push(Line::from(Span::styled(format!("  {}", error), t.error_style())));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Tab/↑↓ navigate  Enter select/next  Ctrl+S submit  Esc cancel",
        t.muted_style(),
    )));
    lines
}

/// Render the merge request creation form
pub fn render_mr_create(frame: &mut Frame, area: Rect, screen: &MrCreateScreen) {
    frame.render_widget(Paragraph::new(form_lines(screen)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn texts(screen: &MrCreateScreen) -> Vec<String> {
        form_lines(screen)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_form_shows_project_suggestions() {
        let mut screen = MrCreateScreen::default();
        screen.activate(vec!["g/a".to_string(), "g/b".to_string()]);
        let lines = texts(&screen);

        assert_eq!(lines[0], "  Create Merge Request");
        assert!(lines[2].starts_with("▸ Project:"));
        assert!(lines[2].ends_with("█"));
        assert!(lines[3].ends_with(" ▸ g/a"));
        assert!(lines[4].ends_with("   g/b"));
        assert!(lines.iter().any(|l| l.contains("Target Branch: main")));
    }

    #[test]
    fn test_draft_checkbox() {
        let mut screen = MrCreateScreen::default();
        screen.activate(Vec::new());
        assert!(texts(&screen).iter().any(|l| l.ends_with("Draft:         [ ]")));

        for _ in 0..5 {
            screen.handle_key(Key::Tab);
        }
        screen.handle_key(Key::Char(' '));
        assert!(texts(&screen).iter().any(|l| l.ends_with("Draft:         [x]")));
    }

    #[test]
    fn test_validation_error_shown() {
        let mut screen = MrCreateScreen::default();
        screen.activate(Vec::new());
        screen.handle_key(Key::Ctrl('s'));
        assert!(texts(&screen).iter().any(|l| l.contains("Project is required")));
    }
}
