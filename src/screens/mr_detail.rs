//! Merge request detail: header, description, and a Diffs/Comments tab

use chrono::Utc;
use serde::Serialize;

use super::text::{LineKind, ScrollText, TextLine};
use super::Intent;
use crate::input::Key;
use crate::model::{time_ago, MergeRequest, MrDiff, MrNote, ProjectId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DetailTab {
    #[default]
    Diffs,
    Comments,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MrDetailScreen {
    mr: Option<MergeRequest>,
    diffs: Vec<MrDiff>,
    notes: Vec<MrNote>,
    diffs_loaded: bool,
    notes_loaded: bool,
    tab: DetailTab,
    text: ScrollText,
}

impl MrDetailScreen {
    pub fn merge_request(&self) -> Option<&MergeRequest> {
        self.mr.as_ref()
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn text(&self) -> &ScrollText {
        &self.text
    }

    pub fn diffs_loaded(&self) -> bool {
        self.diffs_loaded
    }

    pub fn notes_loaded(&self) -> bool {
        self.notes_loaded
    }

    pub fn shows(&self, project_id: ProjectId, iid: u64) -> bool {
        self.mr
            .as_ref()
            .is_some_and(|mr| mr.project_id == project_id && mr.iid == iid)
    }

    /// Show `mr`. Diffs and notes of a previously shown merge request are dropped.
    pub fn set_merge_request(&mut self, mr: MergeRequest) {
        if !self.shows(mr.project_id, mr.iid) {
            self.diffs.clear();
            self.notes.clear();
            self.diffs_loaded = false;
            self.notes_loaded = false;
            self.tab = DetailTab::Diffs;
            self.text.scroll_to_top();
        }
        self.mr = Some(mr);
        self.rebuild();
    }

    /// Mark diffs and notes as not loaded, ahead of a manual refresh
    pub fn force_reset(&mut self) {
        self.diffs.clear();
        self.notes.clear();
        self.diffs_loaded = false;
        self.notes_loaded = false;
        self.rebuild();
    }

    pub fn set_diffs(&mut self, diffs: Vec<MrDiff>) {
        self.diffs = diffs;
        self.diffs_loaded = true;
        if self.tab == DetailTab::Diffs {
            self.rebuild();
        }
    }

    pub fn set_notes(&mut self, notes: Vec<MrNote>) {
        self.notes = notes;
        self.notes_loaded = true;
        if self.tab == DetailTab::Comments {
            self.rebuild();
        }
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.text.set_terminal_height(height);
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            DetailTab::Diffs => DetailTab::Comments,
            DetailTab::Comments => DetailTab::Diffs,
        };
        self.rebuild();
        self.text.scroll_to_top();
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        match key {
            Key::Tab => {
                self.toggle_tab();
                None
            }
            Key::Char('r') => self.mr.clone().map(Intent::RefreshMergeRequest),
            Key::Char('a') => self
                .mr
                .as_ref()
                .filter(|mr| mr.is_open())
                .cloned()
                .map(Intent::ApproveRequested),
            Key::Char('m') => self
                .mr
                .as_ref()
                .filter(|mr| mr.is_open())
                .cloned()
                .map(Intent::MergeRequested),
            other => {
                self.text.handle_key(other);
                None
            }
        }
    }

    fn rebuild(&mut self) {
        let Some(mr) = &self.mr else {
            return;
        };
        let mut lines = Vec::new();

        let draft = if mr.draft { " [Draft]" } else { "" };
        lines.push(TextLine::new(
            LineKind::Title,
            format!("{} !{}: {}{}", mr.state.symbol(), mr.iid, mr.title, draft),
        ));
        lines.push(TextLine::new(
            LineKind::Muted,
            format!(
                "Author: @{}  |  {} → {}  |  {}  |  {}",
                mr.author, mr.source_branch, mr.target_branch, mr.state, mr.merge_status
            ),
        ));
        if !mr.description.is_empty() {
            lines.push(TextLine::plain(""));
            lines.extend(mr.description.lines().map(TextLine::plain));
        }
        lines.push(TextLine::plain(""));

        let tab_bar = match self.tab {
            DetailTab::Diffs => " [Diffs]  |   Comments  ",
            DetailTab::Comments => "  Diffs   |  [Comments] ",
        };
        lines.push(TextLine::new(LineKind::TabBar, tab_bar));
        lines.push(TextLine::new(LineKind::Muted, "─".repeat(60)));
        lines.push(TextLine::plain(""));

        match self.tab {
            DetailTab::Diffs => self.diff_lines(&mut lines),
            DetailTab::Comments => self.note_lines(&mut lines),
        }

        self.text.set_lines(lines);
    }

    fn diff_lines(&self, lines: &mut Vec<TextLine>) {
        if !self.diffs_loaded {
            lines.push(TextLine::new(LineKind::Muted, "Loading diffs..."));
            return;
        }
        if self.diffs.is_empty() {
            lines.push(TextLine::new(LineKind::Muted, "No changes."));
            return;
        }
        for diff in &self.diffs {
            lines.push(TextLine::new(LineKind::FileHeader, diff.label()));
            lines.extend(diff.diff.lines().map(diff_line));
            lines.push(TextLine::plain(""));
        }
    }

    fn note_lines(&self, lines: &mut Vec<TextLine>) {
        if !self.notes_loaded {
            lines.push(TextLine::new(LineKind::Muted, "Loading comments..."));
            return;
        }
        if self.notes.is_empty() {
            lines.push(TextLine::new(LineKind::Muted, "No comments."));
            return;
        }
        let now = Utc::now();
        for note in &self.notes {
            let prefix = if note.system { "[system] " } else { "" };
            let when = note
                .created_at
                .map(|at| time_ago(at, now))
                .unwrap_or_default();
            lines.push(TextLine::new(
                if note.system { LineKind::Muted } else { LineKind::Title },
                format!("{}@{} ({}):", prefix, note.author, when),
            ));
            lines.extend(note.body.lines().map(TextLine::plain));
            lines.push(TextLine::plain(""));
        }
    }
}

fn diff_line(line: &str) -> TextLine {
    let kind = if line.starts_with("@@") {
        LineKind::Hunk
    } else if line.starts_with('+') {
        LineKind::Added
    } else if line.starts_with('-') {
        LineKind::Removed
    } else {
        LineKind::Plain
    };
    TextLine::new(kind, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MrState;

    fn mr(iid: u64, state: MrState) -> MergeRequest {
        MergeRequest {
            id: 100 + iid,
            iid,
            project_id: 1,
            project_path: "g/a".to_string(),
            title: "Add cache".to_string(),
            description: "Adds a cache\nlayer".to_string(),
            state,
            author: "alice".to_string(),
            source_branch: "feat/cache".to_string(),
            target_branch: "main".to_string(),
            merge_status: "can_be_merged".to_string(),
            draft: false,
            web_url: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn diff() -> MrDiff {
        MrDiff {
            old_path: "src/lib.rs".to_string(),
            new_path: "src/lib.rs".to_string(),
            diff: "@@ -1,2 +1,2 @@\n-old\n+new\n ctx".to_string(),
            new_file: false,
            deleted_file: false,
            renamed_file: false,
        }
    }

    fn kinds(screen: &MrDetailScreen) -> Vec<LineKind> {
        screen.text().lines().iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_diff_lines_are_classified() {
        let mut screen = MrDetailScreen::default();
        screen.set_merge_request(mr(5, MrState::Opened));
        screen.set_diffs(vec![diff()]);
        let kinds = kinds(&screen);
        assert!(kinds.contains(&LineKind::FileHeader));
        assert!(kinds.contains(&LineKind::Hunk));
        assert!(kinds.contains(&LineKind::Added));
        assert!(kinds.contains(&LineKind::Removed));
    }

    #[test]
    fn test_loading_placeholders() {
        let mut screen = MrDetailScreen::default();
        screen.set_merge_request(mr(5, MrState::Opened));
        assert!(screen.text().lines().iter().any(|l| l.text == "Loading diffs..."));
        screen.toggle_tab();
        assert!(screen.text().lines().iter().any(|l| l.text == "Loading comments..."));
    }

    #[test]
    fn test_tab_toggles_and_scrolls_to_top() {
        let mut screen = MrDetailScreen::default();
        screen.set_terminal_height(8);
        screen.set_merge_request(mr(5, MrState::Opened));
        screen.set_diffs(vec![diff(), diff(), diff()]);
        screen.handle_key(Key::End);
        assert!(screen.text().scroll() > 0);

        assert_eq!(screen.handle_key(Key::Tab), None);
        assert_eq!(screen.tab(), DetailTab::Comments);
        assert_eq!(screen.text().scroll(), 0);
        screen.handle_key(Key::Tab);
        assert_eq!(screen.tab(), DetailTab::Diffs);
    }

    #[test]
    fn test_system_notes_are_marked() {
        let mut screen = MrDetailScreen::default();
        screen.set_merge_request(mr(5, MrState::Opened));
        screen.toggle_tab();
        screen.set_notes(vec![MrNote {
            id: 1,
            author: "bot".to_string(),
            body: "added 1 commit".to_string(),
            created_at: None,
            system: true,
        }]);
        assert!(screen
            .text()
            .lines()
            .iter()
            .any(|l| l.text.starts_with("[system] @bot")));
    }

    #[test]
    fn test_same_mr_keeps_loaded_diffs() {
        let mut screen = MrDetailScreen::default();
        screen.set_merge_request(mr(5, MrState::Opened));
        screen.set_diffs(vec![diff()]);
        screen.set_merge_request(mr(5, MrState::Opened));
        assert!(screen.diffs_loaded());

        screen.set_merge_request(mr(6, MrState::Opened));
        assert!(!screen.diffs_loaded());
    }

    #[test]
    fn test_force_reset() {
        let mut screen = MrDetailScreen::default();
        screen.set_merge_request(mr(5, MrState::Opened));
        screen.set_diffs(vec![diff()]);
        screen.set_notes(Vec::new());
        screen.force_reset();
        assert!(!screen.diffs_loaded());
        assert!(!screen.notes_loaded());
    }

    #[test]
    fn test_approve_and_merge_only_when_open() {
        let mut open = MrDetailScreen::default();
        open.set_merge_request(mr(5, MrState::Opened));
        assert!(matches!(open.handle_key(Key::Char('a')), Some(Intent::ApproveRequested(_))));
        assert!(matches!(open.handle_key(Key::Char('m')), Some(Intent::MergeRequested(_))));

        let mut merged = MrDetailScreen::default();
        merged.set_merge_request(mr(5, MrState::Merged));
        assert_eq!(merged.handle_key(Key::Char('a')), None);
        assert_eq!(merged.handle_key(Key::Char('m')), None);
        assert!(matches!(
            merged.handle_key(Key::Char('r')),
            Some(Intent::RefreshMergeRequest(_))
        ));
    }

    #[test]
    fn test_keys_without_merge_request() {
        let mut screen = MrDetailScreen::default();
        assert_eq!(screen.handle_key(Key::Char('r')), None);
        assert_eq!(screen.handle_key(Key::Char('a')), None);
    }
}
