//! Sub-view state machines
//!
//! Each screen owns its list or text buffer and cursor, reacts to logical
//! keys, and reports anything the controller must act on as an [`Intent`].
//! Screens never issue requests themselves.

mod commits;
mod confirm;
mod filter;
mod jobs;
mod list;
mod log;
mod merge_requests;
mod mr_create;
mod mr_detail;
mod pipelines;
mod projects;
mod text;

pub use commits::CommitsScreen;
pub use confirm::{ConfirmAction, ConfirmDialog, ConfirmFocus, ConfirmResult};
pub use filter::TextFilter;
pub use jobs::{job_hint, JobsScreen};
pub use list::ListCursor;
pub use log::LogScreen;
pub use merge_requests::MergeRequestsScreen;
pub use mr_create::{FormField, MrCreateScreen};
pub use mr_detail::{DetailTab, MrDetailScreen};
pub use pipelines::PipelinesScreen;
pub use projects::{ProjectSearch, ProjectsScreen};
pub use text::{LineKind, ScrollText, TextLine};

use crate::model::{CreateMrOptions, Job, JobAction, MergeRequest, Pipeline, Project};

/// What a screen asks the controller to do
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Projects
    ProjectSelected(Project),
    SearchProjects(String),
    AddProject(String),
    RemoveProjectRequested(String),
    OpenMergeRequests,

    // Pipelines
    PipelineSelected(Pipeline),
    OpenCommits(Pipeline),
    CycleLimit,

    // Jobs
    JobSelected(Job),
    JobActionRequested(JobAction, Job),

    // Merge requests
    MergeRequestSelected(MergeRequest),
    NewMergeRequest,
    RefreshMergeRequest(MergeRequest),
    ApproveRequested(MergeRequest),
    MergeRequested(MergeRequest),

    // Creation form
    SearchBranches {
        project_path: String,
        query: String,
        field: FormField,
    },
    SubmitMergeRequest {
        project_path: String,
        opts: CreateMrOptions,
    },
    CancelCreate,
}
