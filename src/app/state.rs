//! Application state
//!
//! One plain value holding everything the reducer mutates. It is owned by
//! the runtime and only changed while a single message is processed.

use serde::Serialize;

use super::message::Command;
use super::view::View;
use crate::config::Settings;
use crate::model::{Job, MergeRequest, Pipeline, Project};
use crate::screens::{
    CommitsScreen, ConfirmDialog, JobsScreen, LogScreen, MergeRequestsScreen, MrCreateScreen,
    MrDetailScreen, PipelinesScreen, ProjectsScreen,
};

#[derive(Debug, Clone, Serialize)]
pub struct AppState {
    /// Current view being displayed
    pub view: View,
    /// Tracked projects, refresh interval and page size
    pub settings: Settings,

    pub selected_project: Option<Project>,
    pub selected_pipeline: Option<Pipeline>,
    pub selected_job: Option<Job>,
    pub selected_mr: Option<MergeRequest>,
    /// Labels after the root crumb
    pub breadcrumb: Vec<String>,

    pub projects: ProjectsScreen,
    pub pipelines: PipelinesScreen,
    pub jobs: JobsScreen,
    pub log: LogScreen,
    pub merge_requests: MergeRequestsScreen,
    pub mr_detail: MrDetailScreen,
    pub mr_create: MrCreateScreen,
    pub commits: CommitsScreen,

    /// Open confirmation dialog; owns all input while present
    pub confirm: Option<ConfirmDialog>,

    /// Loads issued and not yet completed; ticks are coalesced while non-zero
    pub pending: usize,
    pub loading_status: Option<String>,
    /// Most recent failure, cleared by the next successful load
    pub error: Option<String>,

    pub width: u16,
    pub height: u16,

    /// Whether the UI needs to be re-rendered
    #[serde(skip)]
    pub needs_render: bool,
    /// Whether the application should quit
    #[serde(skip)]
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            view: View::default(),
            settings,
            selected_project: None,
            selected_pipeline: None,
            selected_job: None,
            selected_mr: None,
            breadcrumb: Vec::new(),
            projects: ProjectsScreen::default(),
            pipelines: PipelinesScreen::default(),
            jobs: JobsScreen::default(),
            log: LogScreen::default(),
            merge_requests: MergeRequestsScreen::default(),
            mr_detail: MrDetailScreen::default(),
            mr_create: MrCreateScreen::default(),
            commits: CommitsScreen::default(),
            confirm: None,
            pending: 0,
            loading_status: None,
            error: None,
            width: 0,
            height: 0,
            needs_render: true,
            should_quit: false,
        }
    }

    /// Whether the current view is consuming raw text input
    pub fn is_input_mode(&self) -> bool {
        match self.view {
            View::Projects => self.projects.is_input_mode(),
            View::Pipelines => self.pipelines.is_input_mode(),
            View::MergeRequests => self.merge_requests.is_input_mode(),
            View::MergeRequestCreate => self.mr_create.is_input_mode(),
            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn begin_loading(&mut self, status: impl Into<String>) {
        self.loading_status = Some(status.into());
    }

    /// Count the loads among `commands` as in flight
    pub fn track(&mut self, commands: &[Command]) {
        self.pending += commands.iter().filter(|c| c.is_load()).count();
    }

    /// One tracked load completed, successfully or not
    pub fn complete_load(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.loading_status = None;
        }
    }

    /// A load finished successfully
    pub fn finish_loading(&mut self) {
        self.complete_load();
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.projects.set_terminal_height(height);
        self.pipelines.set_terminal_height(height);
        self.jobs.set_terminal_height(height);
        self.log.set_terminal_height(height);
        self.merge_requests.set_terminal_height(height);
        self.mr_detail.set_terminal_height(height);
        self.commits.set_terminal_height(height);
    }

    /// Crumbs identifying the selected pipeline
    pub fn pipeline_crumbs(&self) -> Vec<String> {
        self.selected_pipeline
            .as_ref()
            .map(|p| vec![p.project_path.clone(), format!("#{}", p.id)])
            .unwrap_or_default()
    }

    pub fn project_count_status(&self, verb: &str) -> String {
        format!("{} {} projects...", verb, self.settings.projects.len())
    }
}
