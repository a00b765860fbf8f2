//! Cursor and scroll offset shared by the list screens

use std::ops::Range;

use serde::Serialize;

use crate::input::Key;

/// Rows taken by header, filter line, padding and footer
const CHROME_ROWS: u16 = 6;
const MIN_ROWS: usize = 5;

/// Cursor into a list plus the first visible row
///
/// Keeps `offset <= cursor < offset + height` after every move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCursor {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl Default for ListCursor {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            height: 20,
        }
    }
}

impl ListCursor {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Derive the number of visible rows from the terminal height
    pub fn set_terminal_height(&mut self, terminal_height: u16) {
        self.height = (terminal_height.saturating_sub(CHROME_ROWS) as usize).max(MIN_ROWS);
        self.ensure_visible();
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Scroll just enough to keep the cursor on screen
    pub fn ensure_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
        if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }

    /// Pull the cursor back into `0..len` (0 for an empty list)
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        if self.offset > self.cursor {
            self.offset = self.cursor;
        }
        self.ensure_visible();
    }

    /// Apply a navigation key. Returns false if the key is not a navigation key.
    pub fn handle_key(&mut self, key: Key, len: usize) -> bool {
        let last = len.saturating_sub(1);
        let half_page = (self.height / 2).max(1);
        match key {
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                if self.cursor < last {
                    self.cursor += 1;
                }
            }
            Key::Home | Key::Char('g') => self.cursor = 0,
            Key::End | Key::Char('G') => self.cursor = last,
            Key::PageUp | Key::Ctrl('u') => self.cursor = self.cursor.saturating_sub(half_page),
            Key::PageDown | Key::Ctrl('d') => self.cursor = (self.cursor + half_page).min(last),
            _ => return false,
        }
        self.ensure_visible();
        true
    }

    /// Indices of the rows currently on screen
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.height).min(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_with_height(height: u16) -> ListCursor {
        let mut list = ListCursor::default();
        list.set_terminal_height(height);
        list
    }

    #[test]
    fn test_height_has_minimum() {
        assert_eq!(cursor_with_height(30).height(), 24);
        assert_eq!(cursor_with_height(8).height(), 5);
        assert_eq!(cursor_with_height(0).height(), 5);
    }

    #[test]
    fn test_down_scrolls_window() {
        let mut list = cursor_with_height(11); // 5 rows
        for _ in 0..6 {
            list.handle_key(Key::Down, 10);
        }
        assert_eq!(list.cursor(), 6);
        assert_eq!(list.offset(), 2);
        assert_eq!(list.visible_range(10), 2..7);
    }

    #[test]
    fn test_down_stops_at_end() {
        let mut list = ListCursor::default();
        list.handle_key(Key::End, 3);
        list.handle_key(Key::Char('j'), 3);
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn test_page_moves_half_height() {
        let mut list = cursor_with_height(26); // 20 rows
        list.handle_key(Key::PageDown, 100);
        assert_eq!(list.cursor(), 10);
        list.handle_key(Key::Ctrl('d'), 100);
        assert_eq!(list.cursor(), 20);
        assert_eq!(list.offset(), 1);
        list.handle_key(Key::Ctrl('u'), 100);
        assert_eq!(list.cursor(), 10);
        list.handle_key(Key::Home, 100);
        assert_eq!((list.cursor(), list.offset()), (0, 0));
    }

    #[test]
    fn test_clamp_into_range() {
        let mut list = ListCursor::default();
        list.handle_key(Key::End, 50);
        list.clamp(3);
        assert_eq!(list.cursor(), 2);
        assert!(list.offset() <= list.cursor());
        list.clamp(0);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_non_navigation_key() {
        let mut list = ListCursor::default();
        assert!(!list.handle_key(Key::Enter, 5));
        assert!(!list.handle_key(Key::Char('x'), 5));
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut list = ListCursor::default();
        list.handle_key(Key::Down, 0);
        list.handle_key(Key::End, 0);
        list.handle_key(Key::PageDown, 0);
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.visible_range(0), 0..0);
    }
}
