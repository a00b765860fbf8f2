//! Screen layout helper
//!
//! Renders the shared header and footer and hands back the content area for
//! view-specific rendering.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::header::{Header, HEADER_HEIGHT};
use crate::tui::theme::theme;

/// Footer height (top border, status row, hint row)
pub const FOOTER_HEIGHT: u16 = 3;

/// A hotkey and what it does
pub type Hint = (&'static str, &'static str);

/// Screen layout builder
pub struct ScreenLayout<'a> {
    area: Rect,
    header: Option<Header<'a>>,
    hints: &'a [Hint],
    /// Shown in the footer status row, in red
    error: Option<&'a str>,
}

impl<'a> ScreenLayout<'a> {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            header: None,
            hints: &[],
            error: None,
        }
    }

    pub fn with_header(mut self, header: Header<'a>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_hints(mut self, hints: &'a [Hint]) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Render header and footer, returning the areas
    pub fn render(self, frame: &mut Frame) -> LayoutAreas {
        let header_height = if self.header.is_some() {
            HEADER_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(self.area);

        if let Some(header) = &self.header {
            header.render(frame, chunks[0]);
        }
        render_footer(frame, chunks[2], self.hints, self.error);

        LayoutAreas {
            header: (header_height > 0).then_some(chunks[0]),
            content: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Areas calculated by ScreenLayout
#[derive(Debug, Clone, Copy)]
pub struct LayoutAreas {
    pub header: Option<Rect>,
    pub content: Rect,
    pub footer: Rect,
}

/// Hotkey hints as alternating key/description spans
pub fn hint_line(hints: &[Hint]) -> Line<'static> {
    let t = theme();
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, t.key_style()));
        spans.push(Span::styled(format!(" {}", desc), t.muted_style()));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, area: Rect, hints: &[Hint], error: Option<&str>) {
    let t = theme();
    let status = match error {
        Some(err) => Line::from(Span::styled(format!("Error: {}", err), t.error_style())),
        None => Line::from(""),
    };
    let footer = Paragraph::new(vec![status, hint_line(hints)]).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(t.muted_style()),
    );
    frame.render_widget(footer, area);
}
