//! REST client for the GitLab v4 API

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::api::GitLabApi;
use super::error::{GitLabError, Result};
use crate::model::{
    Commit, CreateMrOptions, Job, JobStatus, MergeRequest, MrDiff, MrNote, MrState, Pipeline,
    PipelineStatus, Project, ProjectId,
};

/// Per-request timeout; the controller itself never times out a command
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Largest `per_page` GitLab accepts
const MAX_PAGE_SIZE: usize = 100;

/// HTTP client bound to one GitLab instance
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

impl GitLabClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("glcli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        // Url::join drops the last path segment unless it ends with a slash
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let api_url = Url::parse(&base)
            .and_then(|u| u.join("api/v4/"))
            .map_err(|e| GitLabError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        debug!("GitLab client created for {}", api_url);
        Ok(Self {
            client,
            api_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| GitLabError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn project_url(&self, project: &str, rest: &str) -> Result<Url> {
        let encoded: String = url::form_urlencoded::byte_serialize(project.as_bytes()).collect();
        if rest.is_empty() {
            self.url(&format!("projects/{}", encoded))
        } else {
            self.url(&format!("projects/{}/{}", encoded, rest))
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        if let Some(token) = &self.token {
            request.bearer_auth(token)
        } else {
            request
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            warn!("GitLab request failed with {}: {}", status, message);
            return Err(GitLabError::Http {
                status: status.as_u16(),
                message: summarize_error_body(&message),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {}", url);
        self.json(self.request(Method::GET, url).query(query)).await
    }

    async fn job_mutation(&self, project_id: ProjectId, job_id: u64, verb: &str) -> Result<Job> {
        let url = self.project_url(&project_id.to_string(), &format!("jobs/{}/{}", job_id, verb))?;
        debug!("POST {}", url);
        let dto: JobDto = self.json(self.request(Method::POST, url)).await?;
        Ok(dto.into_job(project_id, 0))
    }
}

/// A full page means more rows may follow
fn more_pages(received: usize, page_size: usize, collected: usize, limit: usize) -> bool {
    received == page_size && collected < limit
}

/// GitLab error bodies are JSON like `{"message": "..."}`; keep only the message
fn summarize_error_body(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<serde_json::Value>,
        #[serde(default)]
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(serde_json::Value::String(s)),
            ..
        }) => s,
        Ok(ErrorBody {
            message: Some(other),
            ..
        }) => other.to_string(),
        Ok(ErrorBody { error: Some(e), .. }) => e,
        _ => body.chars().take(200).collect(),
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ProjectDto {
    id: u64,
    name: String,
    path_with_namespace: String,
    #[serde(default)]
    web_url: String,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project {
            id: dto.id,
            name: dto.name,
            path_with_namespace: dto.path_with_namespace,
            web_url: dto.web_url,
            pipeline_count: 0,
            active_count: 0,
        }
    }
}

#[derive(Deserialize)]
struct PipelineDto {
    id: u64,
    #[serde(rename = "ref", default)]
    git_ref: String,
    status: PipelineStatus,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    duration: Option<u64>,
}

#[derive(Deserialize)]
struct PipelineRefDto {
    id: u64,
}

#[derive(Deserialize)]
struct JobDto {
    id: u64,
    name: String,
    #[serde(default)]
    stage: String,
    status: JobStatus,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    web_url: String,
    #[serde(default)]
    pipeline: Option<PipelineRefDto>,
}

impl JobDto {
    fn into_job(self, project_id: ProjectId, fallback_pipeline_id: u64) -> Job {
        Job {
            id: self.id,
            pipeline_id: self
                .pipeline
                .map(|p| p.id)
                .unwrap_or(fallback_pipeline_id),
            project_id,
            name: self.name,
            stage: self.stage,
            status: self.status,
            duration: self.duration,
            started_at: self.started_at,
            finished_at: self.finished_at,
            web_url: self.web_url,
        }
    }
}

#[derive(Deserialize)]
struct UserDto {
    username: String,
}

#[derive(Deserialize)]
struct ReferencesDto {
    #[serde(default)]
    full: String,
}

#[derive(Deserialize)]
struct MergeRequestDto {
    id: u64,
    iid: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    state: MrState,
    #[serde(default)]
    author: Option<UserDto>,
    source_branch: String,
    target_branch: String,
    #[serde(default)]
    merge_status: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    web_url: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    references: Option<ReferencesDto>,
}

impl MergeRequestDto {
    fn into_merge_request(self, project_id: ProjectId) -> MergeRequest {
        // references.full is "group/project!12"
        let project_path = self
            .references
            .and_then(|r| r.full.split_once('!').map(|(path, _)| path.to_string()))
            .unwrap_or_default();
        MergeRequest {
            id: self.id,
            iid: self.iid,
            project_id,
            project_path,
            title: self.title,
            description: self.description.unwrap_or_default(),
            state: self.state,
            author: self.author.map(|a| a.username).unwrap_or_default(),
            source_branch: self.source_branch,
            target_branch: self.target_branch,
            merge_status: self.merge_status,
            draft: self.draft,
            web_url: self.web_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct NoteDto {
    id: u64,
    #[serde(default)]
    body: String,
    #[serde(default)]
    author: Option<UserDto>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    system: bool,
}

#[derive(Deserialize)]
struct DiffDto {
    #[serde(default)]
    old_path: String,
    #[serde(default)]
    new_path: String,
    #[serde(default)]
    diff: String,
    #[serde(default)]
    new_file: bool,
    #[serde(default)]
    deleted_file: bool,
    #[serde(default)]
    renamed_file: bool,
}

#[derive(Deserialize)]
struct CommitDto {
    short_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    author_email: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    web_url: String,
}

#[derive(Deserialize)]
struct BranchDto {
    name: String,
}

#[derive(Serialize)]
struct CreateMrBody<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
}

// ---------------------------------------------------------------------------
// GitLabApi implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl GitLabApi for GitLabClient {
    async fn get_project(&self, path: &str) -> Result<Project> {
        let url = self.project_url(path, "")?;
        match self.get::<ProjectDto>(url, &[]).await {
            Ok(dto) => Ok(dto.into()),
            Err(GitLabError::Http { status: 404, .. }) => {
                Err(GitLabError::ProjectNotFound(path.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn search_projects(&self, query: &str) -> Result<Vec<Project>> {
        let url = self.url("projects")?;
        let dtos: Vec<ProjectDto> = self
            .get(
                url,
                &[
                    ("search", query.to_string()),
                    ("per_page", "10".to_string()),
                    ("order_by", "name".to_string()),
                    ("simple", "true".to_string()),
                ],
            )
            .await?;
        debug!("Project search {:?} found {}", query, dtos.len());
        Ok(dtos.into_iter().map(Project::from).collect())
    }

    async fn list_branches(&self, project_id: ProjectId, query: &str) -> Result<Vec<String>> {
        let url = self.project_url(&project_id.to_string(), "repository/branches")?;
        let mut params = vec![("per_page", "20".to_string())];
        if !query.is_empty() {
            params.push(("search", query.to_string()));
        }
        let dtos: Vec<BranchDto> = self.get(url, &params).await?;
        Ok(dtos.into_iter().map(|b| b.name).collect())
    }

    async fn list_pipelines(&self, project_id: ProjectId, limit: usize) -> Result<Vec<Pipeline>> {
        let url = self.project_url(&project_id.to_string(), "pipelines")?;
        let page_size = limit.clamp(1, MAX_PAGE_SIZE);
        let mut dtos: Vec<PipelineDto> = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<PipelineDto> = self
                .get(
                    url.clone(),
                    &[
                        ("per_page", page_size.to_string()),
                        ("page", page.to_string()),
                        ("order_by", "id".to_string()),
                        ("sort", "desc".to_string()),
                    ],
                )
                .await?;
            let received = batch.len();
            dtos.extend(batch);

            if !more_pages(received, page_size, dtos.len(), limit) {
                break;
            }
            page += 1;
        }
        dtos.truncate(limit);

        Ok(dtos
            .into_iter()
            .map(|dto| Pipeline {
                id: dto.id,
                project_id,
                project_path: String::new(),
                git_ref: dto.git_ref,
                status: dto.status,
                created_at: dto.created_at.unwrap_or_default(),
                duration: dto.duration,
                job_count: None,
            })
            .collect())
    }

    async fn list_jobs(&self, project_id: ProjectId, pipeline_id: u64) -> Result<Vec<Job>> {
        let project = project_id.to_string();
        let params = [("per_page", "100".to_string())];

        let url = self.project_url(&project, &format!("pipelines/{}/jobs", pipeline_id))?;
        let jobs: Vec<JobDto> = self.get(url, &params).await?;
        let mut result: Vec<Job> = jobs
            .into_iter()
            .map(|j| j.into_job(project_id, pipeline_id))
            .collect();

        // Trigger jobs live on a separate endpoint; missing them is not fatal
        let url = self.project_url(&project, &format!("pipelines/{}/bridges", pipeline_id))?;
        match self.get::<Vec<JobDto>>(url, &params).await {
            Ok(bridges) => result.extend(
                bridges
                    .into_iter()
                    .map(|j| j.into_job(project_id, pipeline_id)),
            ),
            Err(e) => warn!("Bridge jobs for pipeline {} unavailable: {}", pipeline_id, e),
        }
        Ok(result)
    }

    async fn job_log(&self, project_id: ProjectId, job_id: u64) -> Result<String> {
        let url = self.project_url(&project_id.to_string(), &format!("jobs/{}/trace", job_id))?;
        debug!("GET {}", url);
        let response = self.send(self.request(Method::GET, url)).await?;
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn play_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job> {
        self.job_mutation(project_id, job_id, "play").await
    }

    async fn retry_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job> {
        self.job_mutation(project_id, job_id, "retry").await
    }

    async fn cancel_job(&self, project_id: ProjectId, job_id: u64) -> Result<Job> {
        self.job_mutation(project_id, job_id, "cancel").await
    }

    async fn list_merge_requests(
        &self,
        project_id: ProjectId,
        state: &str,
    ) -> Result<Vec<MergeRequest>> {
        let url = self.project_url(&project_id.to_string(), "merge_requests")?;
        let mut params = vec![
            ("per_page", "50".to_string()),
            ("order_by", "updated_at".to_string()),
            ("sort", "desc".to_string()),
        ];
        if !state.is_empty() {
            params.push(("state", state.to_string()));
        }
        let dtos: Vec<MergeRequestDto> = self.get(url, &params).await?;
        Ok(dtos
            .into_iter()
            .map(|d| d.into_merge_request(project_id))
            .collect())
    }

    async fn get_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<MergeRequest> {
        let url = self.project_url(&project_id.to_string(), &format!("merge_requests/{}", iid))?;
        let dto: MergeRequestDto = self.get(url, &[]).await?;
        Ok(dto.into_merge_request(project_id))
    }

    async fn merge_request_diffs(&self, project_id: ProjectId, iid: u64) -> Result<Vec<MrDiff>> {
        let url = self.project_url(
            &project_id.to_string(),
            &format!("merge_requests/{}/diffs", iid),
        )?;
        let dtos: Vec<DiffDto> = self.get(url, &[("per_page", "100".to_string())]).await?;
        Ok(dtos
            .into_iter()
            .map(|d| MrDiff {
                old_path: d.old_path,
                new_path: d.new_path,
                diff: d.diff,
                new_file: d.new_file,
                deleted_file: d.deleted_file,
                renamed_file: d.renamed_file,
            })
            .collect())
    }

    async fn merge_request_notes(&self, project_id: ProjectId, iid: u64) -> Result<Vec<MrNote>> {
        let url = self.project_url(
            &project_id.to_string(),
            &format!("merge_requests/{}/notes", iid),
        )?;
        let dtos: Vec<NoteDto> = self
            .get(
                url,
                &[
                    ("per_page", "100".to_string()),
                    ("order_by", "created_at".to_string()),
                    ("sort", "asc".to_string()),
                ],
            )
            .await?;
        Ok(dtos
            .into_iter()
            .map(|n| MrNote {
                id: n.id,
                author: n.author.map(|a| a.username).unwrap_or_default(),
                body: n.body,
                created_at: n.created_at,
                system: n.system,
            })
            .collect())
    }

    async fn approve_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<()> {
        let url = self.project_url(
            &project_id.to_string(),
            &format!("merge_requests/{}/approve", iid),
        )?;
        debug!("POST {}", url);
        self.send(self.request(Method::POST, url)).await?;
        Ok(())
    }

    async fn merge_merge_request(&self, project_id: ProjectId, iid: u64) -> Result<MergeRequest> {
        let url = self.project_url(
            &project_id.to_string(),
            &format!("merge_requests/{}/merge", iid),
        )?;
        debug!("PUT {}", url);
        let dto: MergeRequestDto = self.json(self.request(Method::PUT, url)).await?;
        Ok(dto.into_merge_request(project_id))
    }

    async fn create_merge_request(
        &self,
        project_id: ProjectId,
        opts: &CreateMrOptions,
    ) -> Result<MergeRequest> {
        let url = self.project_url(&project_id.to_string(), "merge_requests")?;
        let body = CreateMrBody {
            source_branch: &opts.source_branch,
            target_branch: &opts.target_branch,
            title: opts.effective_title(),
            description: &opts.description,
        };
        debug!(
            "POST {} source={} target={} draft={}",
            url, opts.source_branch, opts.target_branch, opts.draft
        );
        let dto: MergeRequestDto = self.json(self.request(Method::POST, url).json(&body)).await?;
        Ok(dto.into_merge_request(project_id))
    }

    async fn list_commits(&self, project_id: ProjectId, git_ref: &str) -> Result<Vec<Commit>> {
        let url = self.project_url(&project_id.to_string(), "repository/commits")?;
        let dtos: Vec<CommitDto> = self
            .get(
                url,
                &[
                    ("ref_name", git_ref.to_string()),
                    ("per_page", "50".to_string()),
                ],
            )
            .await?;
        Ok(dtos
            .into_iter()
            .map(|c| Commit {
                short_id: c.short_id,
                title: c.title,
                author_name: c.author_name,
                author_email: c.author_email,
                created_at: c.created_at,
                web_url: c.web_url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_keeps_base_path() {
        let client = GitLabClient::new("https://git.example.com/gitlab", None).unwrap();
        assert_eq!(
            client.api_url.as_str(),
            "https://git.example.com/gitlab/api/v4/"
        );
    }

    #[test]
    fn test_project_url_encodes_path() {
        let client = GitLabClient::new("https://gitlab.com/", None).unwrap();
        let url = client.project_url("group/sub/app", "pipelines").unwrap();
        assert_eq!(
            url.as_str(),
            "https://gitlab.com/api/v4/projects/group%2Fsub%2Fapp/pipelines"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GitLabClient::new("not a url", None),
            Err(GitLabError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let client = GitLabClient::new("https://gitlab.com", Some(String::new())).unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn test_pipeline_paging_stops_at_limit_or_short_page() {
        // 200 pipelines take two full pages of 100
        assert!(more_pages(100, 100, 100, 200));
        assert!(!more_pages(100, 100, 200, 200));
        // Project has fewer pipelines than the limit
        assert!(!more_pages(40, 100, 140, 200));
        assert!(!more_pages(0, 50, 0, 50));
    }

    #[test]
    fn test_summarize_error_body() {
        assert_eq!(
            summarize_error_body(r#"{"message":"401 Unauthorized"}"#),
            "401 Unauthorized"
        );
        assert_eq!(
            summarize_error_body(r#"{"error":"insufficient_scope"}"#),
            "insufficient_scope"
        );
        assert_eq!(summarize_error_body("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_merge_request_project_path_from_references() {
        let json = r#"{
            "id": 100, "iid": 7, "title": "Add cache", "description": null,
            "state": "opened", "author": {"username": "alice"},
            "source_branch": "feature", "target_branch": "main",
            "merge_status": "can_be_merged", "draft": false,
            "web_url": "https://gitlab.com/g/a/-/merge_requests/7",
            "references": {"full": "g/a!7"}
        }"#;
        let dto: MergeRequestDto = serde_json::from_str(json).unwrap();
        let mr = dto.into_merge_request(3);
        assert_eq!(mr.project_path, "g/a");
        assert_eq!(mr.author, "alice");
        assert_eq!(mr.description, "");
        assert_eq!(mr.state, MrState::Opened);
    }

    #[test]
    fn test_job_dto_pipeline_fallback() {
        let json = r#"{"id": 42, "name": "rspec", "stage": "test", "status": "failed"}"#;
        let dto: JobDto = serde_json::from_str(json).unwrap();
        let job = dto.into_job(1, 7);
        assert_eq!(job.pipeline_id, 7);
        assert_eq!(job.status, JobStatus::Failed);
    }
}
