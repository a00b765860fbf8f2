//! Confirmation dialog overlay
//!
//! Drawn on top of the current view while a confirmation is pending.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::screens::{ConfirmDialog, ConfirmFocus};
use crate::tui::theme::theme;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 8;

/// Area of a `width` x `height` box centered in `area`, clamped to fit
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn button(label: &'static str, focused: bool) -> Span<'static> {
    let t = theme();
    if focused {
        Span::styled(format!("[ {} ]", label), t.active_tab_style())
    } else {
        Span::styled(format!("  {}  ", label), t.muted_style())
    }
}

pub(crate) fn dialog_lines(dialog: &ConfirmDialog) -> Vec<Line<'static>> {
    let t = theme();
    let focus = dialog.focus();
    vec![
        Line::from(""),
        Line::from(Span::styled(
            dialog.message().to_string(),
            Style::default().fg(t.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            button("Yes", focus == ConfirmFocus::Yes),
            Span::raw("   "),
            button("No", focus == ConfirmFocus::No),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" confirm  ", t.muted_style()),
            Span::styled("n/Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel  ", t.muted_style()),
            Span::styled("←→", t.key_style()),
            Span::styled(" choose", t.muted_style()),
        ]),
    ]
}

/// Render the confirmation dialog centered over `area`
///
/// Yellow border marks an action that changes something on the server.
pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, dialog: &ConfirmDialog) {
    let t = theme();
    let dialog_area = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);

    let paragraph = Paragraph::new(dialog_lines(dialog))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.border_warning))
                .title("Confirm"),
        );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(paragraph, dialog_area);
}
