//! Jobs of the selected pipeline

use serde::Serialize;

use super::list::ListCursor;
use super::Intent;
use crate::input::Key;
use crate::model::{Job, JobAction};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobsScreen {
    jobs: Vec<Job>,
    list: ListCursor,
    loaded: bool,
}

impl JobsScreen {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn list(&self) -> &ListCursor {
        &self.list
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn selected(&self) -> Option<&Job> {
        self.jobs.get(self.list.cursor())
    }

    /// Forget the previous pipeline's jobs
    pub fn reset(&mut self) {
        self.jobs.clear();
        self.loaded = false;
        self.list.reset();
    }

    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.loaded = true;
        self.list.clamp(self.jobs.len());
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.list.set_terminal_height(height);
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        if self.list.handle_key(key, self.jobs.len()) {
            return None;
        }
        let job = self.selected()?;
        match key {
            Key::Enter => Some(Intent::JobSelected(job.clone())),
            Key::Char('r') => job
                .run_action()
                .map(|action| Intent::JobActionRequested(action, job.clone())),
            Key::Char('c') if job.status.can_cancel() => {
                Some(Intent::JobActionRequested(JobAction::Cancel, job.clone()))
            }
            _ => None,
        }
    }
}

/// Key hint shown next to a job row
pub fn job_hint(job: &Job) -> Option<&'static str> {
    if job.status.can_cancel() {
        Some("[c:cancel]")
    } else if job.status.can_retry() {
        Some("[r:retry]")
    } else if job.status.can_play() {
        Some("[r:run]")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobStatus;

    fn job(id: u64, status: JobStatus) -> Job {
        Job {
            id,
            pipeline_id: 7,
            project_id: 1,
            name: format!("job-{}", id),
            stage: "test".to_string(),
            status,
            duration: None,
            started_at: None,
            finished_at: None,
            web_url: String::new(),
        }
    }

    fn screen(jobs: Vec<Job>) -> JobsScreen {
        let mut screen = JobsScreen::default();
        screen.set_jobs(jobs);
        screen
    }

    #[test]
    fn test_run_key_by_status() {
        let mut manual = screen(vec![job(1, JobStatus::Manual)]);
        assert!(matches!(
            manual.handle_key(Key::Char('r')),
            Some(Intent::JobActionRequested(JobAction::Play, _))
        ));

        let mut failed = screen(vec![job(2, JobStatus::Failed)]);
        assert!(matches!(
            failed.handle_key(Key::Char('r')),
            Some(Intent::JobActionRequested(JobAction::Retry, _))
        ));

        let mut success = screen(vec![job(3, JobStatus::Success)]);
        assert_eq!(success.handle_key(Key::Char('r')), None);
    }

    #[test]
    fn test_cancel_only_running_or_pending() {
        let mut running = screen(vec![job(1, JobStatus::Running)]);
        assert!(matches!(
            running.handle_key(Key::Char('c')),
            Some(Intent::JobActionRequested(JobAction::Cancel, _))
        ));
        let mut failed = screen(vec![job(2, JobStatus::Failed)]);
        assert_eq!(failed.handle_key(Key::Char('c')), None);
    }

    #[test]
    fn test_enter_opens_log() {
        let mut screen = screen(vec![job(1, JobStatus::Success), job(2, JobStatus::Failed)]);
        screen.handle_key(Key::Down);
        assert!(matches!(
            screen.handle_key(Key::Enter),
            Some(Intent::JobSelected(j)) if j.id == 2
        ));
    }

    #[test]
    fn test_reload_clamps_cursor() {
        let mut screen = screen(vec![job(1, JobStatus::Success), job(2, JobStatus::Failed)]);
        screen.handle_key(Key::End);
        screen.set_jobs(vec![job(1, JobStatus::Success)]);
        assert_eq!(screen.list().cursor(), 0);
        screen.set_jobs(Vec::new());
        assert_eq!(screen.list().cursor(), 0);
        assert_eq!(screen.handle_key(Key::Enter), None);
    }

    #[test]
    fn test_job_hints() {
        assert_eq!(job_hint(&job(1, JobStatus::Manual)), Some("[r:run]"));
        assert_eq!(job_hint(&job(1, JobStatus::Failed)), Some("[r:retry]"));
        assert_eq!(job_hint(&job(1, JobStatus::Pending)), Some("[c:cancel]"));
        assert_eq!(job_hint(&job(1, JobStatus::Success)), None);
    }
}
