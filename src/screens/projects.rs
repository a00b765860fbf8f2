//! Tracked projects, with search-and-add and removal

use serde::Serialize;

use super::list::ListCursor;
use super::Intent;
use crate::input::Key;
use crate::model::Project;

/// Minimum query length before a remote search is issued
const MIN_SEARCH_CHARS: usize = 2;

/// The "add project" search box
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectSearch {
    pub query: String,
    pub results: Vec<Project>,
    pub list: ListCursor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectsScreen {
    projects: Vec<Project>,
    list: ListCursor,
    loaded: bool,
    search: Option<ProjectSearch>,
}

impl ProjectsScreen {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn list(&self) -> &ListCursor {
        &self.list
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn search(&self) -> Option<&ProjectSearch> {
        self.search.as_ref()
    }

    /// Typing into the search box
    pub fn is_input_mode(&self) -> bool {
        self.search.is_some()
    }

    pub fn selected(&self) -> Option<&Project> {
        self.projects.get(self.list.cursor())
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.loaded = true;
        self.list.clamp(self.projects.len());
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.list.set_terminal_height(height);
        if let Some(search) = &mut self.search {
            search.list.set_terminal_height(height);
        }
    }

    /// Search results arrive asynchronously; results for an outdated query are dropped
    pub fn set_search_results(&mut self, query: &str, results: Vec<Project>) -> bool {
        match &mut self.search {
            Some(search) if search.query == query => {
                search.results = results;
                search.list.reset();
                true
            }
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        if self.search.is_some() {
            return self.handle_search_key(key);
        }

        if self.list.handle_key(key, self.projects.len()) {
            return None;
        }
        match key {
            Key::Enter => self.selected().cloned().map(Intent::ProjectSelected),
            Key::Char('a') => {
                let mut search = ProjectSearch::default();
                search.list = self.list.clone();
                search.list.reset();
                self.search = Some(search);
                None
            }
            Key::Char('d') => self
                .selected()
                .map(|p| Intent::RemoveProjectRequested(p.path_with_namespace.clone())),
            Key::Char('m') => Some(Intent::OpenMergeRequests),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: Key) -> Option<Intent> {
        let search = self.search.as_mut()?;
        match key {
            Key::Esc => {
                self.search = None;
                None
            }
            Key::Enter => {
                let path = search
                    .results
                    .get(search.list.cursor())
                    .map(|p| p.path_with_namespace.clone());
                if path.is_some() {
                    self.search = None;
                }
                path.map(Intent::AddProject)
            }
            Key::Up | Key::Down | Key::Tab | Key::BackTab => {
                let nav = match key {
                    Key::Tab => Key::Down,
                    Key::BackTab => Key::Up,
                    other => other,
                };
                search.list.handle_key(nav, search.results.len());
                None
            }
            Key::Backspace => {
                search.query.pop();
                Self::query_changed(search)
            }
            Key::Char(c) => {
                search.query.push(c);
                Self::query_changed(search)
            }
            _ => None,
        }
    }

    fn query_changed(search: &mut ProjectSearch) -> Option<Intent> {
        search.results.clear();
        search.list.reset();
        if search.query.chars().count() >= MIN_SEARCH_CHARS {
            Some(Intent::SearchProjects(search.query.clone()))
        } else {
            None
        }
    }
}
