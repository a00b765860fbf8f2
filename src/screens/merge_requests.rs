//! Open merge requests of all tracked projects

use serde::Serialize;

use super::filter::TextFilter;
use super::list::ListCursor;
use super::Intent;
use crate::input::Key;
use crate::model::MergeRequest;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeRequestsScreen {
    merge_requests: Vec<MergeRequest>,
    visible: Vec<usize>,
    filter: TextFilter,
    list: ListCursor,
    loaded: bool,
}

fn filter_fields(mr: &MergeRequest) -> Vec<&str> {
    vec![
        mr.title.as_str(),
        mr.author.as_str(),
        mr.source_branch.as_str(),
        mr.project_path.as_str(),
    ]
}

impl MergeRequestsScreen {
    pub fn list(&self) -> &ListCursor {
        &self.list
    }

    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_input_mode(&self) -> bool {
        self.filter.is_editing()
    }

    pub fn all(&self) -> &[MergeRequest] {
        &self.merge_requests
    }

    pub fn visible(&self) -> impl Iterator<Item = &MergeRequest> + '_ {
        self.visible.iter().map(|&i| &self.merge_requests[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn selected(&self) -> Option<&MergeRequest> {
        self.visible
            .get(self.list.cursor())
            .map(|&i| &self.merge_requests[i])
    }

    pub fn set_merge_requests(&mut self, merge_requests: Vec<MergeRequest>) {
        self.merge_requests = merge_requests;
        self.loaded = true;
        self.apply_filter();
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.list.set_terminal_height(height);
    }

    fn apply_filter(&mut self) {
        self.visible = self.filter.apply(&self.merge_requests, filter_fields);
        self.list.clamp(self.visible.len());
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        if self.filter.is_editing() {
            if self.filter.handle_key(key) {
                self.apply_filter();
            }
            return None;
        }

        if self.list.handle_key(key, self.visible.len()) {
            return None;
        }
        match key {
            Key::Enter => self.selected().cloned().map(Intent::MergeRequestSelected),
            Key::Char('/') => {
                self.filter.begin();
                self.apply_filter();
                None
            }
            Key::Char('n') => Some(Intent::NewMergeRequest),
            _ => None,
        }
    }
}
