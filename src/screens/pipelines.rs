//! Aggregated pipelines of all tracked projects

use serde::Serialize;

use super::filter::TextFilter;
use super::list::ListCursor;
use super::Intent;
use crate::input::Key;
use crate::model::Pipeline;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelinesScreen {
    pipelines: Vec<Pipeline>,
    /// Indices into `pipelines` that pass the filter
    visible: Vec<usize>,
    filter: TextFilter,
    list: ListCursor,
    loaded: bool,
}

fn filter_fields(p: &Pipeline) -> Vec<&str> {
    vec![p.project_path.as_str(), p.git_ref.as_str(), p.status.as_str()]
}

impl PipelinesScreen {
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

    /// Unfiltered list as last loaded
    pub fn all(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Pipelines passing the filter, in load order
    pub fn visible(&self) -> impl Iterator<Item = &Pipeline> + '_ {
        self.visible.iter().map(|&i| &self.pipelines[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn selected(&self) -> Option<&Pipeline> {
        self.visible
            .get(self.list.cursor())
            .map(|&i| &self.pipelines[i])
    }

    pub fn set_pipelines(&mut self, pipelines: Vec<Pipeline>) {
        self.pipelines = pipelines;
        self.loaded = true;
        self.apply_filter();
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.list.set_terminal_height(height);
    }

    fn apply_filter(&mut self) {
        self.visible = self.filter.apply(&self.pipelines, filter_fields);
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
            Key::Enter => self.selected().cloned().map(Intent::PipelineSelected),
            Key::Char('c') => self.selected().cloned().map(Intent::OpenCommits),
            Key::Char('/') => {
                self.filter.begin();
                self.apply_filter();
                None
            }
            Key::Char('l') => Some(Intent::CycleLimit),
            _ => None,
        }
    }
}
