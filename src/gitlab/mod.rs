//! GitLab data access
//!
//! - [`GitLabApi`]: primitive REST operations, one per endpoint
//! - [`GitLabClient`]: the reqwest implementation
//! - [`GitLabService`]: multi-project aggregation used by the UI

mod api;
mod client;
mod error;
mod service;

pub use api::GitLabApi;
pub use client::GitLabClient;
pub use error::{GitLabError, Result};
pub use service::GitLabService;

#[cfg(test)]
pub(crate) use service::fake::FakeGitLab;
