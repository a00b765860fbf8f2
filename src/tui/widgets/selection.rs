//! Helper functions for consistent selection rendering across all lists.
//!
//! Selected rows get an arrow prefix and bold text. No background
//! highlighting is used.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::theme::Theme;

/// Returns the selection prefix for a list row.
///
/// Selected rows get an arrow (`▸ `), unselected rows get two spaces for alignment.
pub fn selection_prefix(is_selected: bool) -> &'static str {
    if is_selected {
        "▸ "
    } else {
        "  "
    }
}

/// Bold accent for the selected row, plain text otherwise
pub fn selection_style_with_accent(is_selected: bool, theme: &Theme) -> Style {
    if is_selected {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    }
}

/// Prepend the selection prefix to a row and embolden it when selected.
///
/// Spans that carry their own color (statuses) keep it.
pub fn selectable_row<'a>(is_selected: bool, spans: Vec<Span<'a>>, theme: &Theme) -> Line<'a> {
    let mut row = Vec::with_capacity(spans.len() + 1);
    row.push(Span::styled(
        selection_prefix(is_selected),
        selection_style_with_accent(is_selected, theme),
    ));
    for span in spans {
        if is_selected {
            row.push(span.patch_style(Style::default().add_modifier(Modifier::BOLD)));
        } else {
            row.push(span);
        }
    }
    Line::from(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_selection_prefix() {
        assert_eq!(selection_prefix(true), "▸ ");
        assert_eq!(selection_prefix(false), "  ");
    }

    #[test]
    fn test_selectable_row_keeps_status_color() {
        let theme = Theme::dark();
        let status = Span::styled("failed", Style::default().fg(Color::Red));
        let row = selectable_row(true, vec![Span::raw("g/a "), status], &theme);

        assert_eq!(row.spans[0].content, "▸ ");
        assert_eq!(row.spans[2].style.fg, Some(Color::Red));
        assert!(row.spans[2].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unselected_row_is_plain() {
        let theme = Theme::dark();
        let row = selectable_row(false, vec![Span::raw("x")], &theme);
        assert_eq!(row.spans[0].content, "  ");
        assert!(!row.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }
}
