//! Job log viewer

use console::strip_ansi_codes;
use serde::Serialize;

use super::text::{ScrollText, TextLine};
use super::Intent;
use crate::input::Key;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogScreen {
    job_id: Option<u64>,
    job_name: String,
    text: ScrollText,
    loaded: bool,
}

impl LogScreen {
    pub fn job_id(&self) -> Option<u64> {
        self.job_id
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn text(&self) -> &ScrollText {
        &self.text
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Prepare for a different job's log
    pub fn open(&mut self, job_id: u64, job_name: &str) {
        if self.job_id != Some(job_id) {
            self.job_id = Some(job_id);
            self.job_name = job_name.to_string();
            self.text.set_lines(Vec::new());
            self.loaded = false;
        }
    }

    /// Replace the log. Follows the tail on first load and while already at the bottom.
    pub fn set_content(&mut self, raw: &str) {
        let follow = !self.loaded || self.text.is_at_bottom();
        self.text
            .set_lines(clean_log(raw).into_iter().map(TextLine::plain).collect());
        if follow {
            self.text.scroll_to_bottom();
        }
        self.loaded = true;
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.text.set_terminal_height(height);
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Intent> {
        self.text.handle_key(key);
        None
    }
}

/// Split a raw job trace into display lines.
///
/// Traces carry ANSI color codes and carriage-return progress updates; only
/// the final state of each line is kept.
fn clean_log(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let last = line.rsplit('\r').find(|s| !s.is_empty()).unwrap_or("");
            strip_ansi_codes(last).into_owned()
        })
        .collect()
}
