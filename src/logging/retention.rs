//! Age-based removal of old log files

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tracing::debug;

use super::LOG_FILE_PREFIX;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up log files older than the retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    cleanup_old_logs_with_retention(logs_dir, DEFAULT_RETENTION_DAYS)
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
}

/// Clean up log files last modified more than `retention_days` ago
pub fn cleanup_old_logs_with_retention(logs_dir: &Path, retention_days: u64) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(retention_days * 24 * 60 * 60))
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted = 0;
    for entry in fs::read_dir(logs_dir)?.flatten() {
        let path = entry.path();
        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(is_log_file)
            .unwrap_or(false);
        if !is_ours {
            continue;
        }

        let stale = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|modified| modified < cutoff)
            .unwrap_or(false);
        if stale && fs::remove_file(&path).is_ok() {
            debug!("Removed old log file {}", path.display());
            deleted += 1;
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let count = cleanup_old_logs(Path::new("/nonexistent/glcli/logs")).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file("glcli-2026-01-21_14-30-45.log"));
        assert!(!is_log_file("other-2026-01-21_14-30-45.log"));
        assert!(!is_log_file("glcli-notes.txt"));
    }

    #[test]
    fn test_cleanup_keeps_recent_files() {
        let temp_dir = TempDir::new().unwrap();
        let log_file = temp_dir.path().join("glcli-2026-01-21_14-30-45.log");
        File::create(&log_file).unwrap();

        assert_eq!(cleanup_old_logs(temp_dir.path()).unwrap(), 0);
        assert!(log_file.exists());
    }

    #[test]
    fn test_zero_retention_removes_only_our_files() {
        let temp_dir = TempDir::new().unwrap();
        let ours = temp_dir.path().join("glcli-2026-01-01_00-00-00.log");
        let other = temp_dir.path().join("notes.log");
        File::create(&ours).unwrap();
        File::create(&other).unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cleanup_old_logs_with_retention(temp_dir.path(), 0).unwrap(), 1);
        assert!(!ours.exists());
        assert!(other.exists());
    }
}
