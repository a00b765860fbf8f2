//! Merge request creation form
//!
//! Six fields edited in place. The project field completes from the tracked
//! projects; the branch fields complete from server-side branch search,
//! which the form requests through [`Intent::SearchBranches`].

use serde::Serialize;

use super::Intent;
use crate::input::Key;
use crate::model::CreateMrOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormField {
    Project,
    Source,
    Target,
    Title,
    Description,
    Draft,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Project,
        FormField::Source,
        FormField::Target,
        FormField::Title,
        FormField::Description,
        FormField::Draft,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Project => "Project",
            FormField::Source => "Source Branch",
            FormField::Target => "Target Branch",
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Draft => "Draft",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    fn is_branch(self) -> bool {
        matches!(self, FormField::Source | FormField::Target)
    }
}

/// Number of text-valued fields (all but Draft)
const TEXT_FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrCreateScreen {
    values: [String; TEXT_FIELDS],
    draft: bool,
    cursor: FormField,
    active: bool,
    projects: Vec<String>,
    project_suggestions: Vec<String>,
    branch_suggestions: Vec<String>,
    suggestion_cursor: usize,
    error: Option<String>,
}

impl Default for MrCreateScreen {
    fn default() -> Self {
        Self {
            values: Default::default(),
            draft: false,
            cursor: FormField::Project,
            active: false,
            projects: Vec::new(),
            project_suggestions: Vec::new(),
            branch_suggestions: Vec::new(),
            suggestion_cursor: 0,
            error: None,
        }
    }
}

impl MrCreateScreen {
    /// Open an empty form. Target defaults to `main`.
    pub fn activate(&mut self, projects: Vec<String>) {
        *self = Self {
            active: true,
            project_suggestions: projects.clone(),
            projects,
            ..Self::default()
        };
        self.values[FormField::Target.index()] = "main".to_string();
    }

    pub fn is_input_mode(&self) -> bool {
        self.active
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values
            .get(field.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn draft(&self) -> bool {
        self.draft
    }

    pub fn cursor(&self) -> FormField {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestion_cursor(&self) -> usize {
        self.suggestion_cursor
    }

    /// Suggestions for the focused field
    pub fn suggestions(&self) -> &[String] {
        match self.cursor {
            FormField::Project => &self.project_suggestions,
            f if f.is_branch() => &self.branch_suggestions,
            _ => &[],
        }
    }

    /// Apply a branch search result if it still matches what the user typed
    pub fn set_branch_results(
        &mut self,
        field: FormField,
        query: &str,
        branches: Vec<String>,
    ) -> bool {
        if !self.active || field != self.cursor || self.value(field) != query {
            return false;
        }
        self.branch_suggestions = branches;
        self.suggestion_cursor = 0;
        true
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        if !self.suggestions().is_empty() {
            let count = self.suggestions().len();
            match key {
                Key::Esc => {
                    self.clear_suggestions();
                    return None;
                }
                Key::Tab | Key::Down => {
                    if self.suggestion_cursor + 1 < count {
                        self.suggestion_cursor += 1;
                    }
                    return None;
                }
                Key::BackTab | Key::Up => {
                    self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
                    return None;
                }
                Key::Enter => {
                    if let Some(choice) = self.suggestions().get(self.suggestion_cursor).cloned() {
                        self.values[self.cursor.index()] = choice;
                        self.clear_suggestions();
                        self.cursor = self.cursor.next();
                    }
                    return None;
                }
                _ => {}
            }
        }

        match key {
            Key::Esc => {
                self.active = false;
                return Some(Intent::CancelCreate);
            }
            Key::Tab | Key::Down => {
                self.clear_suggestions();
                self.cursor = self.cursor.next();
            }
            Key::BackTab | Key::Up => {
                self.clear_suggestions();
                self.cursor = self.cursor.prev();
            }
            Key::Enter => match self.cursor {
                FormField::Draft => self.draft = !self.draft,
                FormField::Description => return self.submit(),
                _ => {
                    self.clear_suggestions();
                    self.cursor = self.cursor.next();
                }
            },
            Key::Ctrl('s') => return self.submit(),
            Key::Char(' ') => match self.cursor {
                FormField::Draft => self.draft = !self.draft,
                // Project paths and branch names never contain spaces
                FormField::Project | FormField::Source | FormField::Target => {}
                field => self.values[field.index()].push(' '),
            },
            Key::Backspace if self.cursor != FormField::Draft => {
                if self.values[self.cursor.index()].pop().is_some() {
                    self.clear_suggestions();
                    return self.on_field_changed();
                }
            }
            Key::Char(c) if self.cursor != FormField::Draft => {
                self.values[self.cursor.index()].push(c);
                self.clear_suggestions();
                return self.on_field_changed();
            }
            _ => {}
        }
        None
    }

    fn clear_suggestions(&mut self) {
        self.project_suggestions.clear();
        self.branch_suggestions.clear();
        self.suggestion_cursor = 0;
    }

    fn on_field_changed(&mut self) -> Option<Intent> {
        match self.cursor {
            FormField::Project => {
                self.filter_projects();
                None
            }
            field if field.is_branch() => {
                let query = self.value(field).to_string();
                let project_path = self.value(FormField::Project).trim().to_string();
                if query.is_empty() || project_path.is_empty() {
                    return None;
                }
                Some(Intent::SearchBranches {
                    project_path,
                    query,
                    field,
                })
            }
            _ => None,
        }
    }

    fn filter_projects(&mut self) {
        let query = self.value(FormField::Project).to_lowercase();
        self.project_suggestions = self
            .projects
            .iter()
            .filter(|p| query.is_empty() || p.to_lowercase().contains(&query))
            .cloned()
            .collect();
        self.suggestion_cursor = 0;
    }

    fn submit(&mut self) -> Option<Intent> {
        let field = |f: FormField| self.value(f).trim().to_string();
        let project_path = field(FormField::Project);
        let source = field(FormField::Source);
        let target = field(FormField::Target);
        let title = field(FormField::Title);
        let description = field(FormField::Description);

        let error = if project_path.is_empty() {
            Some("Project is required")
        } else if source.is_empty() || target.is_empty() || title.is_empty() {
            Some("Source, target and title are required")
        } else if source == target {
            Some("Source and target branches must be different")
        } else {
            None
        };
        if let Some(error) = error {
            self.error = Some(error.to_string());
            return None;
        }

        let opts = CreateMrOptions {
            source_branch: source,
            target_branch: target,
            title,
            description,
            draft: self.draft,
        };
        self.error = None;
        self.active = false;
        Some(Intent::SubmitMergeRequest { project_path, opts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MrCreateScreen {
        let mut form = MrCreateScreen::default();
        form.activate(vec!["group/api".to_string(), "group/web".to_string()]);
        form
    }

    fn type_text(form: &mut MrCreateScreen, text: &str) -> Option<Intent> {
        let mut last = None;
        for c in text.chars() {
            last = form.handle_key(Key::Char(c));
        }
        last
    }

    /// Fill every field without touching suggestions
    fn fill(form: &mut MrCreateScreen, source: &str, target: &str, title: &str) {
        type_text(form, "group/api");
        form.handle_key(Key::Esc); // close project suggestions
        form.handle_key(Key::Tab);
        type_text(form, source);
        form.handle_key(Key::Tab);
        for _ in 0..form.value(FormField::Target).len() {
            form.handle_key(Key::Backspace);
        }
        type_text(form, target);
        form.handle_key(Key::Tab);
        type_text(form, title);
        form.handle_key(Key::Tab);
    }

    #[test]
    fn test_activate_defaults() {
        let form = form();
        assert!(form.is_input_mode());
        assert_eq!(form.cursor(), FormField::Project);
        assert_eq!(form.value(FormField::Target), "main");
        assert_eq!(form.suggestions().len(), 2);
    }

    #[test]
    fn test_project_suggestions_filter_and_pick() {
        let mut form = form();
        type_text(&mut form, "WEB");
        assert_eq!(form.suggestions(), ["group/web".to_string()]);

        form.handle_key(Key::Enter);
        assert_eq!(form.value(FormField::Project), "group/web");
        assert_eq!(form.cursor(), FormField::Source);
    }

    #[test]
    fn test_branch_search_requests() {
        let mut form = form();
        form.handle_key(Key::Esc);
        form.handle_key(Key::Tab);
        // No project yet
        assert_eq!(type_text(&mut form, "f"), None);
        form.handle_key(Key::Backspace);

        form.handle_key(Key::BackTab);
        type_text(&mut form, "group/api");
        form.handle_key(Key::Esc);
        form.handle_key(Key::Tab);
        assert_eq!(
            type_text(&mut form, "fe"),
            Some(Intent::SearchBranches {
                project_path: "group/api".to_string(),
                query: "fe".to_string(),
                field: FormField::Source,
            })
        );
    }

    #[test]
    fn test_stale_branch_results_are_ignored() {
        let mut form = form();
        form.handle_key(Key::Esc);
        form.handle_key(Key::Tab);
        type_text(&mut form, "feat");

        assert!(!form.set_branch_results(FormField::Source, "fe", vec!["feature".to_string()]));
        assert!(!form.set_branch_results(FormField::Target, "feat", vec!["feature".to_string()]));
        assert!(form.suggestions().is_empty());

        assert!(form.set_branch_results(FormField::Source, "feat", vec!["feature".to_string()]));
        form.handle_key(Key::Enter);
        assert_eq!(form.value(FormField::Source), "feature");
        assert_eq!(form.cursor(), FormField::Target);
    }

    #[test]
    fn test_spaces_not_allowed_in_branch_fields() {
        let mut form = form();
        form.handle_key(Key::Esc);
        form.handle_key(Key::Tab);
        type_text(&mut form, "a b");
        assert_eq!(form.value(FormField::Source), "ab");
    }

    #[test]
    fn test_draft_toggles() {
        let mut form = form();
        form.handle_key(Key::Esc);
        for _ in 0..10 {
            form.handle_key(Key::Tab);
        }
        assert_eq!(form.cursor(), FormField::Draft);
        form.handle_key(Key::Char(' '));
        assert!(form.draft());
        form.handle_key(Key::Enter);
        assert!(!form.draft());
    }

    #[test]
    fn test_validation_errors() {
        let mut form = form();
        form.handle_key(Key::Esc); // close suggestions
        assert_eq!(form.handle_key(Key::Ctrl('s')), None);
        assert_eq!(form.error(), Some("Project is required"));

        let mut form = self::form();
        fill(&mut form, "main", "main", "Same");
        assert_eq!(form.handle_key(Key::Ctrl('s')), None);
        assert_eq!(
            form.error(),
            Some("Source and target branches must be different")
        );
        assert!(form.is_input_mode());

        let mut form = self::form();
        fill(&mut form, "feature", "main", "");
        form.handle_key(Key::Ctrl('s'));
        assert_eq!(form.error(), Some("Source, target and title are required"));
    }

    #[test]
    fn test_submit_from_description_enter() {
        let mut form = form();
        fill(&mut form, "feature", "main", " Add cache ");
        assert_eq!(form.cursor(), FormField::Description);
        type_text(&mut form, "details");

        let intent = form.handle_key(Key::Enter);
        assert_eq!(
            intent,
            Some(Intent::SubmitMergeRequest {
                project_path: "group/api".to_string(),
                opts: CreateMrOptions {
                    source_branch: "feature".to_string(),
                    target_branch: "main".to_string(),
                    title: "Add cache".to_string(),
                    description: "details".to_string(),
                    draft: false,
                },
            })
        );
        assert!(!form.is_input_mode());
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = form();
        form.handle_key(Key::Esc); // suggestions first
        assert!(form.is_input_mode());
        assert_eq!(form.handle_key(Key::Esc), Some(Intent::CancelCreate));
        assert!(!form.is_input_mode());
    }
}
