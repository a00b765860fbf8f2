//! Runs reducer commands against the GitLab service
//!
//! Each command is spawned as its own task; its completion is sent back to
//! the event loop as a [`Msg`]. Nothing here touches application state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::message::{Command, Msg, Op};
use crate::gitlab::{GitLabError, GitLabService};

pub type MsgSender = mpsc::UnboundedSender<Msg>;
pub type MsgReceiver = mpsc::UnboundedReceiver<Msg>;

pub fn channel() -> (MsgSender, MsgReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Clone)]
pub struct Executor {
    service: Arc<GitLabService>,
    tx: MsgSender,
}

impl Executor {
    pub fn new(service: Arc<GitLabService>, tx: MsgSender) -> Self {
        Self { service, tx }
    }

    /// Run `command` in the background
    pub fn spawn(&self, command: Command) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(msg) = run(&service, command).await {
                if tx.send(msg).is_err() {
                    debug!("Event loop gone, dropping completion");
                }
            }
        });
    }
}

fn failed(what: Op, error: GitLabError) -> Msg {
    Msg::Failed {
        what,
        error: error.to_string(),
    }
}

/// Execute one command and produce its completion message
pub async fn run(service: &GitLabService, command: Command) -> Option<Msg> {
    let api = service.api();
    let msg = match command {
        Command::ScheduleTick(interval) => {
            tokio::time::sleep(interval).await;
            Msg::Tick
        }
        Command::LoadProjects(paths) => match service.load_projects(&paths).await {
            Ok(projects) => Msg::ProjectsLoaded(projects),
            Err(e) => failed(Op::LoadProjects, e),
        },
        Command::LoadPipelines { projects, limit } => {
            match service.load_all_pipelines(&projects, limit).await {
                Ok(pipelines) => Msg::PipelinesLoaded(pipelines),
                Err(e) => failed(Op::LoadPipelines, e),
            }
        }
        Command::LoadJobs {
            project_id,
            pipeline_id,
        } => match api.list_jobs(project_id, pipeline_id).await {
            Ok(jobs) => Msg::JobsLoaded { pipeline_id, jobs },
            Err(e) => failed(Op::LoadJobs, e),
        },
        Command::LoadLog { project_id, job_id } => match api.job_log(project_id, job_id).await {
            Ok(content) => Msg::LogLoaded { job_id, content },
            Err(e) => failed(Op::LoadLog, e),
        },
        Command::JobAction {
            action,
            project_id,
            job_id,
        } => match service.job_action(action, project_id, job_id).await {
            Ok(job) => Msg::JobActionDone { action, job },
            Err(e) => failed(Op::JobAction, e),
        },
        Command::LoadMergeRequests(paths) => match service.load_all_merge_requests(&paths).await {
            Ok(merge_requests) => Msg::MergeRequestsLoaded(merge_requests),
            Err(e) => failed(Op::LoadMergeRequests, e),
        },
        Command::LoadMrDetail { project_id, iid } => {
            match api.get_merge_request(project_id, iid).await {
                Ok(mr) => Msg::MrDetailLoaded(mr),
                Err(e) => failed(Op::LoadMrDetail, e),
            }
        }
        Command::LoadMrDiffs { project_id, iid } => {
            match api.merge_request_diffs(project_id, iid).await {
                Ok(diffs) => Msg::MrDiffsLoaded {
                    project_id,
                    iid,
                    diffs,
                },
                Err(e) => failed(Op::LoadMrDiffs, e),
            }
        }
        Command::LoadMrNotes { project_id, iid } => {
            match api.merge_request_notes(project_id, iid).await {
                Ok(notes) => Msg::MrNotesLoaded {
                    project_id,
                    iid,
                    notes,
                },
                Err(e) => failed(Op::LoadMrNotes, e),
            }
        }
        Command::ApproveMr { project_id, iid } => {
            match api.approve_merge_request(project_id, iid).await {
                Ok(()) => Msg::MrApproved { project_id, iid },
                Err(e) => failed(Op::ApproveMr, e),
            }
        }
        Command::MergeMr { project_id, iid } => {
            match api.merge_merge_request(project_id, iid).await {
                Ok(mr) => Msg::MrMerged(mr),
                Err(e) => failed(Op::MergeMr, e),
            }
        }
        Command::CreateMr { project_path, opts } => {
            let created = match service.resolve_project_id(&project_path).await {
                Ok(project_id) => api.create_merge_request(project_id, &opts).await,
                Err(e) => Err(e),
            };
            match created {
                Ok(mut mr) => {
                    if mr.project_path.is_empty() {
                        mr.project_path = project_path;
                    }
                    Msg::MrCreated(mr)
                }
                Err(e) => failed(Op::CreateMr, e),
            }
        }
        Command::LoadCommits {
            project_id,
            git_ref,
        } => match api.list_commits(project_id, &git_ref).await {
            Ok(commits) => Msg::CommitsLoaded {
                project_id,
                git_ref,
                commits,
            },
            Err(e) => failed(Op::LoadCommits, e),
        },
        Command::SearchBranches {
            project_path,
            query,
            field,
        } => {
            let branches = match service.resolve_project_id(&project_path).await {
                Ok(project_id) => api.list_branches(project_id, &query).await,
                Err(e) => Err(e),
            };
            // Suggestions are best effort
            let branches = branches.unwrap_or_else(|e| {
                warn!("Branch search in {} failed: {}", project_path, e);
                Vec::new()
            });
            Msg::BranchesLoaded {
                field,
                query,
                branches,
            }
        }
        Command::SearchProjects(query) => match api.search_projects(&query).await {
            Ok(projects) => Msg::ProjectSearchResults { query, projects },
            Err(e) => failed(Op::SearchProjects, e),
        },
        Command::PersistSettings(_) => {
            debug!("PersistSettings is handled by the event loop");
            return None;
        }
    };
    Some(msg)
}
