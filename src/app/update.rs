//! The reducer
//!
//! `update` applies one [`Msg`] to the [`AppState`] and returns the commands
//! to run. It performs no I/O, so every transition can be tested by feeding
//! messages and inspecting the state and the returned commands.

use tracing::{debug, info, warn};

use super::message::{Command, Msg, Op};
use super::state::AppState;
use super::view::View;
use crate::config::next_limit;
use crate::input::{normalize, Key};
use crate::model::MergeRequest;
use crate::screens::{ConfirmAction, ConfirmDialog, Intent};

/// Commands issued at start-up: the landing view's data and the first tick
pub fn init(state: &mut AppState) -> Vec<Command> {
    let status = state.project_count_status("Loading");
    state.begin_loading(status);
    let commands = vec![
        load_pipelines(state),
        Command::ScheduleTick(state.settings.refresh_interval),
    ];
    state.track(&commands);
    commands
}

pub fn update(state: &mut AppState, msg: Msg) -> Vec<Command> {
    state.needs_render = true;
    let commands = reduce(state, msg);
    state.track(&commands);
    commands
}

fn reduce(state: &mut AppState, msg: Msg) -> Vec<Command> {
    match msg {
        Msg::Key(key) => handle_key(state, key),
        Msg::Resize { width, height } => {
            state.set_terminal_size(width, height);
            Vec::new()
        }
        Msg::Tick => on_tick(state),

        Msg::ProjectsLoaded(projects) => {
            state.finish_loading();
            state.projects.set_projects(projects);
            Vec::new()
        }
        Msg::PipelinesLoaded(pipelines) => {
            state.finish_loading();
            state.pipelines.set_pipelines(pipelines);
            Vec::new()
        }
        Msg::JobsLoaded { pipeline_id, jobs } => {
            state.finish_loading();
            if state.selected_pipeline.as_ref().map(|p| p.id) == Some(pipeline_id) {
                state.jobs.set_jobs(jobs);
            } else {
                debug!("Dropping jobs of pipeline {}: no longer selected", pipeline_id);
            }
            Vec::new()
        }
        Msg::LogLoaded { job_id, content } => {
            state.finish_loading();
            if state.log.job_id() == Some(job_id) {
                state.log.set_content(&content);
            } else {
                debug!("Dropping log of job {}: no longer shown", job_id);
            }
            Vec::new()
        }
        Msg::JobActionDone { action, job } => {
            state.finish_loading();
            info!("{} job {} done, status {}", action.label(), job.id, job.status);
            reload_jobs(state)
        }
        Msg::MergeRequestsLoaded(merge_requests) => {
            state.finish_loading();
            state.merge_requests.set_merge_requests(merge_requests);
            Vec::new()
        }
        Msg::MrDetailLoaded(mut mr) => {
            state.finish_loading();
            let Some(selected) = state
                .selected_mr
                .as_ref()
                .filter(|s| s.project_id == mr.project_id && s.iid == mr.iid)
            else {
                debug!("Dropping merge request !{}: no longer selected", mr.iid);
                return Vec::new();
            };
            if mr.project_path.is_empty() {
                mr.project_path = selected.project_path.clone();
            }
            state.selected_mr = Some(mr.clone());
            state.mr_detail.set_merge_request(mr);
            Vec::new()
        }
        Msg::MrDiffsLoaded {
            project_id,
            iid,
            diffs,
        } => {
            state.finish_loading();
            if state.mr_detail.shows(project_id, iid) {
                state.mr_detail.set_diffs(diffs);
            } else {
                debug!("Dropping diffs of !{}: no longer shown", iid);
            }
            Vec::new()
        }
        Msg::MrNotesLoaded {
            project_id,
            iid,
            notes,
        } => {
            state.finish_loading();
            if state.mr_detail.shows(project_id, iid) {
                state.mr_detail.set_notes(notes);
            } else {
                debug!("Dropping notes of !{}: no longer shown", iid);
            }
            Vec::new()
        }
        Msg::MrApproved { project_id, iid } => {
            state.finish_loading();
            info!("Approved merge request !{} of project {}", iid, project_id);
            reload_selected_mr(state)
        }
        Msg::MrMerged(mr) => {
            state.finish_loading();
            info!("Merged merge request !{} ({})", mr.iid, mr.state);
            reload_selected_mr(state)
        }
        Msg::MrCreated(mr) => {
            state.finish_loading();
            info!("Created merge request !{} in {}", mr.iid, mr.project_path);
            if !awaiting_create(state) {
                debug!("Not opening !{}: create form was left", mr.iid);
                return Vec::new();
            }
            open_merge_request(state, mr)
        }
        Msg::CommitsLoaded {
            project_id,
            git_ref,
            commits,
        } => {
            state.finish_loading();
            if state.commits.shows(project_id, &git_ref) {
                state.commits.set_commits(commits);
            } else {
                debug!("Dropping commits of {}: no longer shown", git_ref);
            }
            Vec::new()
        }
        Msg::BranchesLoaded {
            field,
            query,
            branches,
        } => {
            if !state.mr_create.set_branch_results(field, &query, branches) {
                debug!("Dropping branch suggestions for {:?} '{}'", field, query);
            }
            Vec::new()
        }
        Msg::ProjectSearchResults { query, projects } => {
            if !state.projects.set_search_results(&query, projects) {
                debug!("Dropping project search results for '{}'", query);
            }
            Vec::new()
        }
        Msg::Failed { what, error } => {
            warn!("Failed {}: {}", what.describe(), error);
            if what.is_load() {
                state.complete_load();
            }
            state.set_error(format!("Failed {}: {}", what.describe(), error));
            if what == Op::CreateMr && awaiting_create(state) {
                state.view = View::MergeRequests;
                state.breadcrumb.clear();
            }
            Vec::new()
        }
    }
}

fn handle_key(state: &mut AppState, key: Key) -> Vec<Command> {
    if let Some(dialog) = state.confirm.as_mut() {
        let Some(result) = dialog.handle_key(normalize(key)) else {
            return Vec::new();
        };
        state.confirm = None;
        if !result.confirmed {
            debug!("Declined: {}", result.action.message());
            return Vec::new();
        }
        return confirmed(state, result.action);
    }

    if key == Key::Ctrl('c') {
        state.should_quit = true;
        return Vec::new();
    }

    // Text input gets the characters as typed
    if state.is_input_mode() {
        return delegate(state, key);
    }

    let key = normalize(key);
    match key {
        Key::Char('q') => {
            state.should_quit = true;
            Vec::new()
        }
        Key::Esc => go_back(state),
        // Tab switches between diffs and comments inside the detail view
        Key::Tab if state.view != View::MergeRequestDetail => {
            let next = state.view.next_tab();
            switch_to_view(state, next)
        }
        Key::BackTab => {
            let prev = state.view.prev_tab();
            switch_to_view(state, prev)
        }
        Key::Char('1') => switch_to_view(state, View::Projects),
        Key::Char('2') => switch_to_view(state, View::Pipelines),
        Key::Char('3') if state.selected_pipeline.is_some() => switch_to_view(state, View::Jobs),
        Key::Char('4') if state.selected_job.is_some() => switch_to_view(state, View::Log),
        Key::Char('5') => switch_to_view(state, View::MergeRequests),
        other => delegate(state, other),
    }
}

/// Route a key to the current view's screen
fn delegate(state: &mut AppState, key: Key) -> Vec<Command> {
    let intent = match state.view {
        View::Projects => state.projects.handle_key(key),
        View::Pipelines => state.pipelines.handle_key(key),
        View::Jobs => state.jobs.handle_key(key),
        View::Log => state.log.handle_key(key),
        View::MergeRequests => state.merge_requests.handle_key(key),
        View::MergeRequestDetail => state.mr_detail.handle_key(key),
        View::MergeRequestCreate => state.mr_create.handle_key(key),
        View::Commits => state.commits.handle_key(key),
    };
    match intent {
        Some(intent) => on_intent(state, intent),
        None => Vec::new(),
    }
}

fn on_intent(state: &mut AppState, intent: Intent) -> Vec<Command> {
    match intent {
        Intent::ProjectSelected(project) => {
            debug!("Project selected: {}", project.path_with_namespace);
            state.view = View::Pipelines;
            state.breadcrumb = vec![project.path_with_namespace.clone()];
            state.selected_project = Some(project);
            let status = state.project_count_status("Loading");
            state.begin_loading(status);
            vec![load_pipelines(state)]
        }
        Intent::SearchProjects(query) => vec![Command::SearchProjects(query)],
        Intent::AddProject(path) => {
            if state.settings.projects.contains(&path) {
                debug!("Project {} is already tracked", path);
                return Vec::new();
            }
            info!("Tracking project {}", path);
            state.settings.projects.push(path);
            settings_changed(state)
        }
        Intent::RemoveProjectRequested(path) => {
            open_confirm(state, ConfirmAction::RemoveProject { path });
            Vec::new()
        }
        Intent::OpenMergeRequests => switch_to_view(state, View::MergeRequests),

        Intent::PipelineSelected(pipeline) => {
            debug!("Pipeline selected: #{}", pipeline.id);
            if state.selected_pipeline.as_ref().map(|p| p.id) != Some(pipeline.id) {
                state.jobs.reset();
                state.selected_job = None;
            }
            state.selected_pipeline = Some(pipeline);
            switch_to_view(state, View::Jobs)
        }
        Intent::OpenCommits(pipeline) => {
            state.view = View::Commits;
            state.breadcrumb = vec![
                pipeline.project_path.clone(),
                pipeline.git_ref.clone(),
                "commits".to_string(),
            ];
            state.commits.open(pipeline.project_id, &pipeline.git_ref);
            state.begin_loading("Loading commits...");
            vec![Command::LoadCommits {
                project_id: pipeline.project_id,
                git_ref: pipeline.git_ref,
            }]
        }
        Intent::CycleLimit => {
            let limit = next_limit(state.settings.pipeline_limit);
            info!("Pipeline limit set to {}", limit);
            state.settings.pipeline_limit = limit;
            let status = state.project_count_status("Loading");
            state.begin_loading(status);
            vec![
                Command::PersistSettings(state.settings.clone()),
                load_pipelines(state),
            ]
        }

        Intent::JobSelected(job) => {
            debug!("Job selected: {} ({})", job.name, job.id);
            state.view = View::Log;
            let mut crumbs = state.pipeline_crumbs();
            crumbs.push(job.name.clone());
            state.breadcrumb = crumbs;
            state.log.open(job.id, &job.name);
            state.begin_loading("Loading log...");
            let command = Command::LoadLog {
                project_id: job.project_id,
                job_id: job.id,
            };
            state.selected_job = Some(job);
            vec![command]
        }
        Intent::JobActionRequested(action, job) => {
            open_confirm(
                state,
                ConfirmAction::Job {
                    action,
                    project_id: job.project_id,
                    job_id: job.id,
                    job_name: job.name,
                },
            );
            Vec::new()
        }

        Intent::MergeRequestSelected(mr) => open_merge_request(state, mr),
        Intent::NewMergeRequest => {
            state.mr_create.activate(state.settings.projects.clone());
            state.view = View::MergeRequestCreate;
            state.breadcrumb = vec!["New MR".to_string()];
            Vec::new()
        }
        Intent::RefreshMergeRequest(mr) => {
            state.mr_detail.force_reset();
            state.begin_loading("Loading merge request...");
            mr_loads(&mr)
        }
        Intent::ApproveRequested(mr) => {
            open_confirm(
                state,
                ConfirmAction::ApproveMr {
                    project_id: mr.project_id,
                    iid: mr.iid,
                },
            );
            Vec::new()
        }
        Intent::MergeRequested(mr) => {
            open_confirm(
                state,
                ConfirmAction::MergeMr {
                    project_id: mr.project_id,
                    iid: mr.iid,
                },
            );
            Vec::new()
        }

        Intent::SearchBranches {
            project_path,
            query,
            field,
        } => vec![Command::SearchBranches {
            project_path,
            query,
            field,
        }],
        Intent::SubmitMergeRequest { project_path, opts } => {
            info!(
                "Creating merge request {} -> {} in {}",
                opts.source_branch, opts.target_branch, project_path
            );
            state.begin_loading("Creating merge request...");
            vec![Command::CreateMr { project_path, opts }]
        }
        Intent::CancelCreate => {
            state.view = View::MergeRequests;
            state.breadcrumb.clear();
            Vec::new()
        }
    }
}

/// The submitted create form is still on screen
fn awaiting_create(state: &AppState) -> bool {
    state.view == View::MergeRequestCreate && !state.mr_create.is_input_mode()
}

fn open_confirm(state: &mut AppState, action: ConfirmAction) {
    debug!("Confirm: {}", action.message());
    state.confirm = Some(ConfirmDialog::new(action));
}

/// The only path by which mutating commands are issued
fn confirmed(state: &mut AppState, action: ConfirmAction) -> Vec<Command> {
    info!("Confirmed: {}", action.message());
    match action {
        ConfirmAction::Job {
            action,
            project_id,
            job_id,
            ..
        } => vec![Command::JobAction {
            action,
            project_id,
            job_id,
        }],
        ConfirmAction::ApproveMr { project_id, iid } => {
            vec![Command::ApproveMr { project_id, iid }]
        }
        ConfirmAction::MergeMr { project_id, iid } => vec![Command::MergeMr { project_id, iid }],
        ConfirmAction::RemoveProject { path } => {
            state.settings.projects.retain(|p| *p != path);
            settings_changed(state)
        }
    }
}

/// Persist the tracked project list and reload everything that depends on it
fn settings_changed(state: &mut AppState) -> Vec<Command> {
    let status = state.project_count_status("Loading");
    state.begin_loading(status);
    vec![
        Command::PersistSettings(state.settings.clone()),
        Command::LoadProjects(state.settings.projects.clone()),
        load_pipelines(state),
    ]
}

fn open_merge_request(state: &mut AppState, mr: MergeRequest) -> Vec<Command> {
    debug!("Merge request selected: !{}", mr.iid);
    state.view = View::MergeRequestDetail;
    state.breadcrumb = vec![mr.project_path.clone(), format!("!{}", mr.iid)];
    state.mr_detail.set_merge_request(mr.clone());
    state.begin_loading("Loading merge request...");
    let commands = mr_loads(&mr);
    state.selected_mr = Some(mr);
    commands
}

/// Detail, diffs and notes, issued together
fn mr_loads(mr: &MergeRequest) -> Vec<Command> {
    let (project_id, iid) = (mr.project_id, mr.iid);
    vec![
        Command::LoadMrDetail { project_id, iid },
        Command::LoadMrDiffs { project_id, iid },
        Command::LoadMrNotes { project_id, iid },
    ]
}

fn reload_selected_mr(state: &mut AppState) -> Vec<Command> {
    match &state.selected_mr {
        Some(mr) => vec![Command::LoadMrDetail {
            project_id: mr.project_id,
            iid: mr.iid,
        }],
        None => Vec::new(),
    }
}

fn reload_jobs(state: &mut AppState) -> Vec<Command> {
    match &state.selected_pipeline {
        Some(pipeline) => {
            let command = Command::LoadJobs {
                project_id: pipeline.project_id,
                pipeline_id: pipeline.id,
            };
            state.begin_loading("Loading jobs...");
            vec![command]
        }
        None => Vec::new(),
    }
}

fn load_pipelines(state: &AppState) -> Command {
    Command::LoadPipelines {
        projects: state.settings.projects.clone(),
        limit: state.settings.pipeline_limit,
    }
}

/// Show a top-level view and load its data
fn switch_to_view(state: &mut AppState, view: View) -> Vec<Command> {
    debug!("Switching to {:?}", view);
    match view {
        View::Projects => {
            state.view = View::Projects;
            state.breadcrumb.clear();
            let status = state.project_count_status("Loading");
            state.begin_loading(status);
            vec![Command::LoadProjects(state.settings.projects.clone())]
        }
        View::Pipelines => {
            state.view = View::Pipelines;
            state.breadcrumb.clear();
            let status = state.project_count_status("Loading");
            state.begin_loading(status);
            vec![load_pipelines(state)]
        }
        View::Jobs => {
            if state.selected_pipeline.is_none() {
                state.view = View::Pipelines;
                return Vec::new();
            }
            state.view = View::Jobs;
            state.breadcrumb = state.pipeline_crumbs();
            reload_jobs(state)
        }
        View::Log => {
            let Some(job) = state.selected_job.clone() else {
                return Vec::new();
            };
            state.view = View::Log;
            let mut crumbs = state.pipeline_crumbs();
            crumbs.push(job.name.clone());
            state.breadcrumb = crumbs;
            state.begin_loading("Loading log...");
            vec![Command::LoadLog {
                project_id: job.project_id,
                job_id: job.id,
            }]
        }
        View::MergeRequests => {
            state.view = View::MergeRequests;
            state.breadcrumb.clear();
            state.begin_loading("Loading merge requests...");
            vec![Command::LoadMergeRequests(state.settings.projects.clone())]
        }
        other => {
            state.view = other;
            Vec::new()
        }
    }
}

/// Esc: move to the parent view. Going back to Projects reloads it; other
/// parents keep their data.
fn go_back(state: &mut AppState) -> Vec<Command> {
    let Some(parent) = state.view.parent() else {
        return Vec::new();
    };
    if parent == View::Projects {
        return switch_to_view(state, View::Projects);
    }
    state.view = parent;
    state.breadcrumb = match parent {
        View::Jobs => state.pipeline_crumbs(),
        _ => Vec::new(),
    };
    Vec::new()
}

fn on_tick(state: &mut AppState) -> Vec<Command> {
    let mut commands = vec![Command::ScheduleTick(state.settings.refresh_interval)];
    if state.is_loading() {
        debug!("Refresh skipped: {} loads in flight", state.pending);
        return commands;
    }
    let refresh = refresh_current_view(state);
    if !refresh.is_empty() {
        let status = state.project_count_status("Refreshing");
        state.begin_loading(status);
        commands.extend(refresh);
    }
    commands
}

fn refresh_current_view(state: &AppState) -> Vec<Command> {
    match state.view {
        View::Projects => vec![Command::LoadProjects(state.settings.projects.clone())],
        View::Pipelines => vec![load_pipelines(state)],
        View::Jobs => state
            .selected_pipeline
            .as_ref()
            .map(|p| Command::LoadJobs {
                project_id: p.project_id,
                pipeline_id: p.id,
            })
            .into_iter()
            .collect(),
        View::Log => state
            .selected_job
            .as_ref()
            .map(|job| Command::LoadLog {
                project_id: job.project_id,
                job_id: job.id,
            })
            .into_iter()
            .collect(),
        View::MergeRequests => vec![Command::LoadMergeRequests(state.settings.projects.clone())],
        View::MergeRequestDetail => state.selected_mr.as_ref().map(mr_loads).unwrap_or_default(),
        View::MergeRequestCreate | View::Commits => Vec::new(),
    }
}
