//! Domain entities
//!
//! Immutable snapshots of GitLab objects as handed to the UI by the data
//! access layer. The controller never edits these in place; it replaces
//! whole collections when a load completes.

mod status;

pub use status::{JobStatus, MrState, PipelineStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitLab numeric project identifier
pub type ProjectId = u64;

/// A tracked GitLab project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Namespaced path, e.g. `group/project`
    pub path_with_namespace: String,
    pub web_url: String,
    /// Number of recent pipelines
    #[serde(default)]
    pub pipeline_count: usize,
    /// Number of running or pending pipelines among them
    #[serde(default)]
    pub active_count: usize,
}

/// A CI pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: u64,
    pub project_id: ProjectId,
    /// Owning project path, denormalized for display
    pub project_path: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub status: PipelineStatus,
    pub created_at: DateTime<Utc>,
    /// Duration in seconds, if finished
    pub duration: Option<u64>,
    /// Number of jobs, when the source reports it
    pub job_count: Option<usize>,
}

impl Pipeline {
    /// Last segment of the project path (`group/sub/app` -> `app`)
    pub fn short_project_name(&self) -> &str {
        short_path(&self.project_path)
    }
}

/// A CI job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub pipeline_id: u64,
    pub project_id: ProjectId,
    pub name: String,
    pub stage: String,
    pub status: JobStatus,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub web_url: String,
}

impl Job {
    /// The mutating action a "run/retry" keypress maps to, if any
    pub fn run_action(&self) -> Option<JobAction> {
        if self.status.can_play() {
            Some(JobAction::Play)
        } else if self.status.can_retry() {
            Some(JobAction::Retry)
        } else {
            None
        }
    }
}

/// Mutations that can be applied to a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobAction {
    Play,
    Retry,
    Cancel,
}

impl JobAction {
    /// Verb shown in the confirmation prompt
    pub fn label(&self) -> &'static str {
        match self {
            JobAction::Play => "Run",
            JobAction::Retry => "Retry",
            JobAction::Cancel => "Cancel",
        }
    }

    /// Whether the action is allowed for a job in `status`
    pub fn allowed_for(&self, status: JobStatus) -> bool {
        match self {
            JobAction::Play => status.can_play(),
            JobAction::Retry => status.can_retry(),
            JobAction::Cancel => status.can_cancel(),
        }
    }
}

/// A merge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Globally unique id
    pub id: u64,
    /// Project-scoped id (`!iid`)
    pub iid: u64,
    pub project_id: ProjectId,
    pub project_path: String,
    pub title: String,
    pub description: String,
    pub state: MrState,
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub merge_status: String,
    pub draft: bool,
    pub web_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MergeRequest {
    pub fn short_project_name(&self) -> &str {
        short_path(&self.project_path)
    }

    /// Approve and merge are only offered for open merge requests
    pub fn is_open(&self) -> bool {
        self.state == MrState::Opened
    }
}

/// A comment (note) on a merge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrNote {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Generated by GitLab rather than a person
    pub system: bool,
}

/// One changed file of a merge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrDiff {
    pub old_path: String,
    pub new_path: String,
    pub diff: String,
    pub new_file: bool,
    pub deleted_file: bool,
    pub renamed_file: bool,
}

impl MrDiff {
    /// File label used as the diff section heading
    pub fn label(&self) -> String {
        if self.new_file {
            format!("{} (new)", self.new_path)
        } else if self.deleted_file {
            format!("{} (deleted)", self.new_path)
        } else if self.renamed_file {
            format!("{} → {} (renamed)", self.old_path, self.new_path)
        } else {
            self.new_path.clone()
        }
    }
}

/// A commit on a ref
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub short_id: String,
    pub title: String,
    pub author_name: String,
    pub author_email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub web_url: String,
}

/// Parameters for creating a merge request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateMrOptions {
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub description: String,
    pub draft: bool,
}

impl CreateMrOptions {
    /// Title sent to GitLab (draft MRs get the `Draft: ` prefix)
    pub fn effective_title(&self) -> String {
        if self.draft {
            format!("Draft: {}", self.title)
        } else {
            self.title.clone()
        }
    }
}

fn short_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Human readable age of a timestamp ("42s ago", "3h ago")
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(at).num_seconds().max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}
