//! Commits on a pipeline's ref

use serde::Serialize;

use super::list::ListCursor;
use super::Intent;
use crate::input::Key;
use crate::model::{Commit, ProjectId};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitsScreen {
    project_id: ProjectId,
    git_ref: String,
    commits: Vec<Commit>,
    list: ListCursor,
    loaded: bool,
}

impl CommitsScreen {
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn list(&self) -> &ListCursor {
        &self.list
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Switch to another ref, dropping the old commits
    pub fn open(&mut self, project_id: ProjectId, git_ref: &str) {
        self.project_id = project_id;
        self.git_ref = git_ref.to_string();
        self.commits.clear();
        self.loaded = false;
        self.list.reset();
    }

    /// Whether a completion for `project_id`/`git_ref` still belongs here
    pub fn shows(&self, project_id: ProjectId, git_ref: &str) -> bool {
        self.project_id == project_id && self.git_ref == git_ref
    }

    pub fn set_commits(&mut self, commits: Vec<Commit>) {
        self.commits = commits;
        self.loaded = true;
        self.list.clamp(self.commits.len());
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.list.set_terminal_height(height);
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        self.list.handle_key(key, self.commits.len());
        None
    }
}
