//! Unified header component
//!
//! Two rows shared by every view:
//! - Tab bar with the numbered hotkeys, current tab highlighted
//! - Breadcrumb on the left, loading status right-aligned

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{View, HEADER_TABS};
use crate::tui::theme::theme;

/// Breadcrumb navigation path segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    segments: Vec<String>,
}

impl Breadcrumb {
    /// Create a new breadcrumb with the root "glcli" segment
    pub fn new() -> Self {
        Self {
            segments: vec!["glcli".to_string()],
        }
    }

    /// Add a segment to the breadcrumb path
    pub fn push(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Format the breadcrumb as a display string with " > " separators
    pub fn display(&self) -> String {
        self.segments.join(" > ")
    }
}

impl Default for Breadcrumb {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> FromIterator<S> for Breadcrumb {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |crumb, s| crumb.push(s))
    }
}

pub struct Header<'a> {
    view: View,
    breadcrumb: Breadcrumb,
    /// Right-aligned status (e.g. "Loading 2 projects...")
    status: Option<&'a str>,
}

impl<'a> Header<'a> {
    pub fn new(view: View, breadcrumb: Breadcrumb) -> Self {
        Self {
            view,
            breadcrumb,
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status.filter(|s| !s.is_empty());
        self
    }

    fn tab_line(&self) -> Line<'static> {
        let t = theme();
        let mut spans = Vec::with_capacity(HEADER_TABS.len() * 2);
        for (hotkey, label, tab_view) in HEADER_TABS {
            let text = format!(" {}:{} ", hotkey, label);
            let style = if self.view.highlights(tab_view) {
                t.active_tab_style()
            } else {
                t.muted_style()
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn breadcrumb_line(&self, width: u16) -> Line<'static> {
        let t = theme();
        let left = self.breadcrumb.display();
        let mut spans = vec![Span::styled(left.clone(), t.header_style())];

        if let Some(status) = self.status {
            let padding = (width as usize)
                .saturating_sub(left.chars().count() + status.chars().count());
            if padding > 0 {
                spans.push(Span::raw(" ".repeat(padding)));
            }
            spans.push(Span::styled(status.to_string(), Style::default().fg(t.loading)));
        }
        Line::from(spans)
    }

    /// Render the header to the given area
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![self.tab_line(), self.breadcrumb_line(area.width)];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Height constant for the header
pub const HEADER_HEIGHT: u16 = 2;
