//! File logging for glcli
//!
//! The terminal is owned by the UI, so all diagnostics go to a timestamped
//! file under `~/.glcli/logs`. Old files are removed at start-up.

mod file_writer;
mod retention;

pub use file_writer::{init_file_logging, LogFileInfo, LoggingGuard};
pub use retention::{cleanup_old_logs, cleanup_old_logs_with_retention};

/// File name prefix shared by the writer and the retention sweep
pub(crate) const LOG_FILE_PREFIX: &str = "glcli-";
