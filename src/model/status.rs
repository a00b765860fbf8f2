//! Status value objects
//!
//! Pipeline, job and merge request states as reported by GitLab. Each status
//! maps to a fixed display symbol; the UI picks colors from the same value.

use serde::{Deserialize, Serialize};

/// Pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Running,
    Pending,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
    Created,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    /// Wire/display name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Running => "running",
            PipelineStatus::Pending => "pending",
            PipelineStatus::Success => "success",
            PipelineStatus::Failed => "failed",
            PipelineStatus::Canceled => "canceled",
            PipelineStatus::Skipped => "skipped",
            PipelineStatus::Manual => "manual",
            PipelineStatus::Created => "created",
            PipelineStatus::Unknown => "unknown",
        }
    }

    /// Single-character symbol shown in lists
    pub fn symbol(&self) -> &'static str {
        match self {
            PipelineStatus::Running => "●",
            PipelineStatus::Pending | PipelineStatus::Created => "◌",
            PipelineStatus::Success => "✓",
            PipelineStatus::Failed => "✗",
            PipelineStatus::Canceled => "⊘",
            PipelineStatus::Skipped => "»",
            PipelineStatus::Manual => "⏸",
            PipelineStatus::Unknown => "?",
        }
    }

    /// Running or pending
    pub fn is_active(&self) -> bool {
        matches!(self, PipelineStatus::Running | PipelineStatus::Pending)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job status (a superset of the pipeline statuses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Pending,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
    Created,
    Scheduled,
    Preparing,
    WaitingForResource,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Pending => "pending",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
            JobStatus::Skipped => "skipped",
            JobStatus::Manual => "manual",
            JobStatus::Created => "created",
            JobStatus::Scheduled => "scheduled",
            JobStatus::Preparing => "preparing",
            JobStatus::WaitingForResource => "waiting_for_resource",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            JobStatus::Running => "●",
            JobStatus::Pending
            | JobStatus::Created
            | JobStatus::Preparing
            | JobStatus::WaitingForResource => "◌",
            JobStatus::Success => "✓",
            JobStatus::Failed => "✗",
            JobStatus::Canceled => "⊘",
            JobStatus::Skipped => "»",
            JobStatus::Manual | JobStatus::Scheduled => "⏸",
            JobStatus::Unknown => "?",
        }
    }

    /// Only manual jobs can be started
    pub fn can_play(&self) -> bool {
        matches!(self, JobStatus::Manual)
    }

    /// Only failed jobs can be retried
    pub fn can_retry(&self) -> bool {
        matches!(self, JobStatus::Failed)
    }

    /// Only running or pending jobs can be canceled
    pub fn can_cancel(&self) -> bool {
        matches!(self, JobStatus::Running | JobStatus::Pending)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge request state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrState {
    Opened,
    Merged,
    Closed,
    Locked,
    #[serde(other)]
    Unknown,
}

impl MrState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MrState::Opened => "opened",
            MrState::Merged => "merged",
            MrState::Closed => "closed",
            MrState::Locked => "locked",
            MrState::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MrState::Opened => "◉",
            MrState::Merged => "✓",
            MrState::Closed => "✗",
            MrState::Locked | MrState::Unknown => "?",
        }
    }
}

impl std::fmt::Display for MrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_status_active() {
        assert!(PipelineStatus::Running.is_active());
        assert!(PipelineStatus::Pending.is_active());
        assert!(!PipelineStatus::Success.is_active());
        assert!(!PipelineStatus::Created.is_active());
    }

    #[test]
    fn test_pipeline_status_symbols() {
        assert_eq!(PipelineStatus::Success.symbol(), "✓");
        assert_eq!(PipelineStatus::Failed.symbol(), "✗");
        assert_eq!(PipelineStatus::Created.symbol(), PipelineStatus::Pending.symbol());
    }

    #[test]
    fn test_job_actions_follow_status() {
        assert!(JobStatus::Manual.can_play());
        assert!(!JobStatus::Failed.can_play());

        assert!(JobStatus::Failed.can_retry());
        assert!(!JobStatus::Success.can_retry());

        assert!(JobStatus::Running.can_cancel());
        assert!(JobStatus::Pending.can_cancel());
        assert!(!JobStatus::Manual.can_cancel());
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: PipelineStatus = serde_json::from_str("\"waiting_for_callback\"").unwrap();
        assert_eq!(status, PipelineStatus::Unknown);

        let job: JobStatus = serde_json::from_str("\"waiting_for_resource\"").unwrap();
        assert_eq!(job, JobStatus::WaitingForResource);
    }

    #[test]
    fn test_mr_state_round_trip_names() {
        let state: MrState = serde_json::from_str("\"merged\"").unwrap();
        assert_eq!(state, MrState::Merged);
        assert_eq!(state.to_string(), "merged");
    }
}
