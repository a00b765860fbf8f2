//! Messages fed into the reducer and commands it hands back

use std::time::Duration;

use crate::config::Settings;
use crate::input::Key;
use crate::model::{
    Commit, CreateMrOptions, Job, JobAction, MergeRequest, MrDiff, MrNote, Pipeline, Project,
    ProjectId,
};
use crate::screens::FormField;

/// The operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LoadProjects,
    LoadPipelines,
    LoadJobs,
    LoadLog,
    JobAction,
    LoadMergeRequests,
    LoadMrDetail,
    LoadMrDiffs,
    LoadMrNotes,
    ApproveMr,
    MergeMr,
    CreateMr,
    LoadCommits,
    SearchProjects,
    SaveSettings,
}

impl Op {
    pub fn describe(&self) -> &'static str {
        match self {
            Op::LoadProjects => "loading projects",
            Op::LoadPipelines => "loading pipelines",
            Op::LoadJobs => "loading jobs",
            Op::LoadLog => "loading job log",
            Op::JobAction => "updating job",
            Op::LoadMergeRequests => "loading merge requests",
            Op::LoadMrDetail => "loading merge request",
            Op::LoadMrDiffs => "loading diffs",
            Op::LoadMrNotes => "loading comments",
            Op::ApproveMr => "approving merge request",
            Op::MergeMr => "merging merge request",
            Op::CreateMr => "creating merge request",
            Op::LoadCommits => "loading commits",
            Op::SearchProjects => "searching projects",
            Op::SaveSettings => "saving config",
        }
    }

    /// Whether the failed command was counted as an in-flight load
    pub fn is_load(&self) -> bool {
        !matches!(self, Op::SearchProjects | Op::SaveSettings)
    }
}

/// Everything the reducer reacts to: input, timer ticks and command completions
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Key(Key),
    Resize {
        width: u16,
        height: u16,
    },
    Tick,

    ProjectsLoaded(Vec<Project>),
    PipelinesLoaded(Vec<Pipeline>),
    JobsLoaded {
        pipeline_id: u64,
        jobs: Vec<Job>,
    },
    LogLoaded {
        job_id: u64,
        content: String,
    },
    JobActionDone {
        action: JobAction,
        job: Job,
    },
    MergeRequestsLoaded(Vec<MergeRequest>),
    MrDetailLoaded(MergeRequest),
    MrDiffsLoaded {
        project_id: ProjectId,
        iid: u64,
        diffs: Vec<MrDiff>,
    },
    MrNotesLoaded {
        project_id: ProjectId,
        iid: u64,
        notes: Vec<MrNote>,
    },
    MrApproved {
        project_id: ProjectId,
        iid: u64,
    },
    MrMerged(MergeRequest),
    MrCreated(MergeRequest),
    CommitsLoaded {
        project_id: ProjectId,
        git_ref: String,
        commits: Vec<Commit>,
    },
    BranchesLoaded {
        field: FormField,
        query: String,
        branches: Vec<String>,
    },
    ProjectSearchResults {
        query: String,
        projects: Vec<Project>,
    },

    Failed {
        what: Op,
        error: String,
    },
}

/// Work requested by the reducer. Every command except `PersistSettings`
/// completes with exactly one [`Msg`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ScheduleTick(Duration),
    LoadProjects(Vec<String>),
    LoadPipelines {
        projects: Vec<String>,
        limit: usize,
    },
    LoadJobs {
        project_id: ProjectId,
        pipeline_id: u64,
    },
    LoadLog {
        project_id: ProjectId,
        job_id: u64,
    },
    JobAction {
        action: JobAction,
        project_id: ProjectId,
        job_id: u64,
    },
    LoadMergeRequests(Vec<String>),
    LoadMrDetail {
        project_id: ProjectId,
        iid: u64,
    },
    LoadMrDiffs {
        project_id: ProjectId,
        iid: u64,
    },
    LoadMrNotes {
        project_id: ProjectId,
        iid: u64,
    },
    ApproveMr {
        project_id: ProjectId,
        iid: u64,
    },
    MergeMr {
        project_id: ProjectId,
        iid: u64,
    },
    CreateMr {
        project_path: String,
        opts: CreateMrOptions,
    },
    LoadCommits {
        project_id: ProjectId,
        git_ref: String,
    },
    SearchBranches {
        project_path: String,
        query: String,
        field: FormField,
    },
    SearchProjects(String),
    /// Write the settings to the config file; run synchronously by the runtime
    PersistSettings(Settings),
}

impl Command {
    /// Loads and server actions. Refresh ticks are coalesced until every one
    /// of them has completed. Search-as-you-type and settings writes do not count.
    pub fn is_load(&self) -> bool {
        !matches!(
            self,
            Command::ScheduleTick(_)
                | Command::SearchBranches { .. }
                | Command::SearchProjects(_)
                | Command::PersistSettings(_)
        )
    }
}
