//! Yes/No confirmation for mutating actions

use serde::Serialize;

use crate::input::Key;
use crate::model::{JobAction, ProjectId};

/// The action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConfirmAction {
    Job {
        action: JobAction,
        project_id: ProjectId,
        job_id: u64,
        job_name: String,
    },
    ApproveMr {
        project_id: ProjectId,
        iid: u64,
    },
    MergeMr {
        project_id: ProjectId,
        iid: u64,
    },
    RemoveProject {
        path: String,
    },
}

impl ConfirmAction {
    /// Prompt shown in the dialog
    pub fn message(&self) -> String {
        match self {
            ConfirmAction::Job {
                action, job_name, ..
            } => format!("{} job \"{}\"?", action.label(), job_name),
            ConfirmAction::ApproveMr { iid, .. } => format!("Approve MR !{}?", iid),
            ConfirmAction::MergeMr { iid, .. } => format!("Merge MR !{}?", iid),
            ConfirmAction::RemoveProject { path } => format!("Remove project \"{}\"?", path),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ConfirmFocus {
    #[default]
    Yes,
    No,
}

/// Outcome of a resolved dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmResult {
    pub confirmed: bool,
    pub action: ConfirmAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmDialog {
    message: String,
    action: ConfirmAction,
    focus: ConfirmFocus,
}

impl ConfirmDialog {
    pub fn new(action: ConfirmAction) -> Self {
        Self {
            message: action.message(),
            action,
            focus: ConfirmFocus::Yes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> &ConfirmAction {
        &self.action
    }

    pub fn focus(&self) -> ConfirmFocus {
        self.focus
    }

    /// Returns a result once the user has decided; the dialog stays open otherwise
    pub fn handle_key(&mut self, key: Key) -> Option<ConfirmResult> {
        let confirmed = match key {
            Key::Left | Key::Char('h') => {
                self.focus = ConfirmFocus::Yes;
                return None;
            }
            Key::Right | Key::Char('l') => {
                self.focus = ConfirmFocus::No;
                return None;
            }
            Key::Enter => self.focus == ConfirmFocus::Yes,
            Key::Char('y') => true,
            Key::Char('n') | Key::Esc => false,
            _ => return None,
        };
        Some(ConfirmResult {
            confirmed,
            action: self.action.clone(),
        })
    }
}
