//! Primitive GitLab operations
//!
//! One method per REST call. Aggregation across several tracked projects
//! lives in [`super::GitLabService`].

use async_trait::async_trait;

use super::error::Result;
use crate::model::{
    Commit, CreateMrOptions, Job, MergeRequest, MrDiff, MrNote, Pipeline, Project, ProjectId,
};

#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// Look up a project by its namespaced path
    async fn get_project(&self, path: &str) -> Result<Project>;

    /// Search projects visible to the current user
    async fn search_projects(&self, query: &str) -> Result<Vec<Project>>;

    /// Branch names of a project matching `query`
    async fn list_branches(&self, project_id: ProjectId, query: &str) -> Result<Vec<String>>;

    /// Up to `limit` most recent pipelines of a project, newest first
    async fn list_pipelines(&self, project_id: ProjectId, limit: usize) -> Result<Vec<Pipeline>>;

    /// Jobs (including bridge jobs) of a pipeline
    async fn list_jobs(&self, project_id: ProjectId, pipeline_id: u64) -> Result<Vec<Job>>;

    /// Raw job trace
    async fn job_log(&self, project_id: ProjectId, job_id: u64) -> Result<String>;

    async fn play_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job>;

    async fn retry_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job>;

    async fn cancel_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job>;

    async fn list_merge_requests(
        &self,
        project_id: ProjectId,
        state: &str,
    ) -> Result<Vec<MergeRequest>>;

    async fn get_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<MergeRequest>;

    async fn merge_request_diffs(&self, project_id: ProjectId, iid: u64) -> Result<Vec<MrDiff>>;

    async fn merge_request_notes(&self, project_id: ProjectId, iid: u64) -> Result<Vec<MrNote>>;

    async fn approve_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<()>;

    async fn merge_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<MergeRequest>;

    async fn create_merge_request(
        &self,
        project_id: ProjectId,
        opts: &CreateMrOptions,
    ) -> Result<MergeRequest>;

    async fn list_commits(&self, project_id: ProjectId, git_ref: &str) -> Result<Vec<Commit>>;
}
