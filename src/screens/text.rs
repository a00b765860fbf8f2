//! Scrollable text buffer used by the log and merge request detail screens

use serde::Serialize;

use crate::input::Key;

/// Rows taken by header, title and footer
const CHROME_ROWS: u16 = 6;

/// Semantic class of a content line; the renderer picks the style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Plain,
    Title,
    Muted,
    TabBar,
    FileHeader,
    Hunk,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextLine {
    pub kind: LineKind,
    pub text: String,
}

impl TextLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(LineKind::Plain, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollText {
    lines: Vec<TextLine>,
    scroll: usize,
    height: usize,
}

impl Default for ScrollText {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            scroll: 0,
            height: 20,
        }
    }
}

impl ScrollText {
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn set_terminal_height(&mut self, terminal_height: u16) {
        self.height = (terminal_height.saturating_sub(CHROME_ROWS) as usize).max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll >= self.max_scroll()
    }

    /// Replace the content, keeping the scroll position where possible
    pub fn set_lines(&mut self, lines: Vec<TextLine>) {
        self.lines = lines;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Lines currently on screen
    pub fn visible(&self) -> &[TextLine] {
        let end = (self.scroll + self.height).min(self.lines.len());
        &self.lines[self.scroll.min(end)..end]
    }

    /// Apply a scroll key. Returns false if the key is not a scroll key.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let page = self.height.max(1);
        let half_page = (self.height / 2).max(1);
        match key {
            Key::Up | Key::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            Key::Down | Key::Char('j') => self.scroll += 1,
            Key::PageUp => self.scroll = self.scroll.saturating_sub(page),
            Key::PageDown | Key::Char(' ') => self.scroll += page,
            Key::Ctrl('u') => self.scroll = self.scroll.saturating_sub(half_page),
            Key::Ctrl('d') => self.scroll += half_page,
            Key::Home | Key::Char('g') => self.scroll = 0,
            Key::End | Key::Char('G') => self.scroll = self.max_scroll(),
            _ => return false,
        }
        self.scroll = self.scroll.min(self.max_scroll());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: usize, terminal_height: u16) -> ScrollText {
        let mut text = ScrollText::default();
        text.set_terminal_height(terminal_height);
        text.set_lines((0..lines).map(|i| TextLine::plain(i.to_string())).collect());
        text
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut text = buffer(15, 16); // 10 rows
        text.handle_key(Key::PageDown);
        assert_eq!(text.scroll(), 5);
        assert!(text.is_at_bottom());
        text.handle_key(Key::Up);
        assert_eq!(text.scroll(), 4);
        text.handle_key(Key::Home);
        assert_eq!(text.scroll(), 0);
        text.handle_key(Key::Up);
        assert_eq!(text.scroll(), 0);
    }

    #[test]
    fn test_visible_window() {
        let mut text = buffer(15, 16);
        text.scroll_to_bottom();
        let visible = text.visible();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].text, "5");
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut text = buffer(3, 16);
        text.handle_key(Key::End);
        text.handle_key(Key::Down);
        assert_eq!(text.scroll(), 0);
        assert_eq!(text.visible().len(), 3);
    }

    #[test]
    fn test_replacing_content_clamps_scroll() {
        let mut text = buffer(100, 16);
        text.scroll_to_bottom();
        text.set_lines(vec![TextLine::plain("only")]);
        assert_eq!(text.scroll(), 0);
    }
}
