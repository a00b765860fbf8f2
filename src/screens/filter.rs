//! Free-text list filter

use serde::Serialize;

use crate::input::Key;

/// Filter text plus whether the user is currently typing it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextFilter {
    text: String,
    editing: bool,
}

impl TextFilter {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Start typing a fresh filter
    pub fn begin(&mut self) {
        self.editing = true;
        self.text.clear();
    }

    /// Feed a key while editing. Returns true if the filter text changed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter | Key::Esc => {
                self.editing = false;
                false
            }
            Key::Backspace => self.text.pop().is_some(),
            Key::Char(c) => {
                self.text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Case-insensitive substring match against any of `fields`
    pub fn matches(&self, fields: &[&str]) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        fields.iter().any(|f| f.to_lowercase().contains(&needle))
    }

    /// Indices of `items` that pass the filter, in original order
    pub fn apply<T, F>(&self, items: &[T], fields: F) -> Vec<usize>
    where
        F: Fn(&T) -> Vec<&str>,
    {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(&fields(item)))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextFilter {
        let mut filter = TextFilter::default();
        filter.begin();
        for c in text.chars() {
            filter.handle_key(Key::Char(c));
        }
        filter
    }

    #[test]
    fn test_matches_case_insensitive() {
        let filter = typed("MaIn");
        assert!(filter.matches(&["g/a", "main"]));
        assert!(!filter.matches(&["g/a", "develop"]));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(TextFilter::default().matches(&["anything"]));
        assert!(TextFilter::default().matches(&[]));
    }

    #[test]
    fn test_editing_keys() {
        let mut filter = typed("ab");
        assert!(filter.is_editing());
        assert!(filter.handle_key(Key::Backspace));
        assert_eq!(filter.text(), "a");
        assert!(filter.handle_key(Key::Backspace));
        assert!(!filter.handle_key(Key::Backspace));
        assert!(!filter.handle_key(Key::Enter));
        assert!(!filter.is_editing());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let items = vec!["alpha", "beta", "gamma", "alphabet"];
        let filter = typed("alp");
        let once = filter.apply(&items, |s| vec![*s]);
        let again = filter.apply(&items, |s| vec![*s]);
        assert_eq!(once, vec![0, 3]);
        assert_eq!(once, again);
    }
}
