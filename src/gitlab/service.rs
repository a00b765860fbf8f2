//! Multi-project operations
//!
//! The UI tracks a list of project paths rather than ids. `GitLabService`
//! resolves them and fans requests out concurrently. A project that fails to
//! load is logged and skipped so the others still render.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tracing::{debug, warn};

use super::api::GitLabApi;
use super::error::{GitLabError, Result};
use crate::model::{Job, JobAction, MergeRequest, Pipeline, Project, ProjectId};

/// Number of recent pipelines used to compute project counters
const PROJECT_SUMMARY_PIPELINES: usize = 20;

pub struct GitLabService {
    api: Arc<dyn GitLabApi>,
    /// path -> id, filled lazily
    ids: Mutex<HashMap<String, ProjectId>>,
}

impl GitLabService {
    pub fn new(api: Arc<dyn GitLabApi>) -> Self {
        Self {
            api,
            ids: Mutex::new(HashMap::new()),
        }
    }

    /// Primitive operations, for calls that need no aggregation
    pub fn api(&self) -> &dyn GitLabApi {
        self.api.as_ref()
    }

    fn cached_id(&self, path: &str) -> Option<ProjectId> {
        self.ids.lock().ok().and_then(|ids| ids.get(path).copied())
    }

    fn remember(&self, project: &Project) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.insert(project.path_with_namespace.clone(), project.id);
        }
    }

    /// Numeric id for a tracked project path
    pub async fn resolve_project_id(&self, path: &str) -> Result<ProjectId> {
        if let Some(id) = self.cached_id(path) {
            return Ok(id);
        }
        let project = self.api.get_project(path).await?;
        self.remember(&project);
        Ok(project.id)
    }

    async fn resolve_project(&self, path: &str) -> Result<Project> {
        let project = self.api.get_project(path).await?;
        self.remember(&project);
        Ok(project)
    }

    /// Tracked projects with pipeline counters
    pub async fn load_projects(&self, paths: &[String]) -> Result<Vec<Project>> {
        let results = join_all(paths.iter().map(|path| async move {
            let mut project = self.resolve_project(path).await?;
            let pipelines = self
                .api
                .list_pipelines(project.id, PROJECT_SUMMARY_PIPELINES)
                .await?;
            project.pipeline_count = pipelines.len();
            project.active_count = pipelines.iter().filter(|p| p.status.is_active()).count();
            Ok::<_, GitLabError>(project)
        }))
        .await;

        collect_partial("projects", paths, results)
    }

    /// Most recent pipelines across all tracked projects, newest first, capped at `limit`
    pub async fn load_all_pipelines(&self, paths: &[String], limit: usize) -> Result<Vec<Pipeline>> {
        let results = join_all(paths.iter().map(|path| async move {
            let id = self.resolve_project_id(path).await?;
            let mut pipelines = self.api.list_pipelines(id, limit).await?;
            for pipeline in &mut pipelines {
                pipeline.project_path = path.clone();
            }
            Ok::<_, GitLabError>(pipelines)
        }))
        .await;

        let mut all: Vec<Pipeline> = collect_partial("pipelines", paths, results)?
            .into_iter()
            .flatten()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        debug!("Loaded {} pipelines from {} projects", all.len(), paths.len());
        Ok(all)
    }

    /// Open merge requests across all tracked projects, most recently updated first
    pub async fn load_all_merge_requests(&self, paths: &[String]) -> Result<Vec<MergeRequest>> {
        let results = join_all(paths.iter().map(|path| async move {
            let id = self.resolve_project_id(path).await?;
            let mut mrs = self.api.list_merge_requests(id, "opened").await?;
            for mr in &mut mrs {
                if mr.project_path.is_empty() {
                    mr.project_path = path.clone();
                }
            }
            Ok::<_, GitLabError>(mrs)
        }))
        .await;

        let mut all: Vec<MergeRequest> = collect_partial("merge requests", paths, results)?
            .into_iter()
            .flatten()
            .collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }

    /// Execute a confirmed job mutation
    pub async fn job_action(
        &self,
        action: JobAction,
        project_id: ProjectId,
        job_id: u64,
    ) -> Result<Job> {
        match action {
            JobAction::Play => self.api.play_job(project_id, job_id).await,
            JobAction::Retry => self.api.retry_job(project_id, job_id).await,
            JobAction::Cancel => self.api.cancel_job(project_id, job_id).await,
        }
    }
}

/// Keep successful per-project results. Only when every project failed is the
/// first error returned.
fn collect_partial<T>(what: &str, paths: &[String], results: Vec<Result<T>>) -> Result<Vec<T>> {
    let mut ok = Vec::with_capacity(results.len());
    let mut first_err = None;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(value) => ok.push(value),
            Err(e) => {
                warn!("Skipping {} for {}: {}", what, path, e);
                first_err.get_or_insert(e);
            }
        }
    }
    match first_err {
        Some(e) if ok.is_empty() => Err(e),
        _ => Ok(ok),
    }
}
