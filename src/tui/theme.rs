//! Theme module for centralized color and style definitions
//!
//! Semantic colors for GitLab statuses, diff lines and UI chrome. Views never
//! pick raw colors for a status; they ask the theme.

use ratatui::style::{Color, Modifier, Style};

use crate::model::{JobStatus, MrState, PipelineStatus};
use crate::screens::LineKind;

/// Application theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // === Statuses ===
    pub status_success: Color,
    pub status_failed: Color,
    pub status_running: Color,
    pub status_manual: Color,
    /// Pending, created, skipped and anything unknown
    pub status_idle: Color,

    // === UI Elements ===
    /// Primary accent color (titles, breadcrumb)
    pub accent: Color,
    /// Hotkeys in hints and the active tab background
    pub key: Color,
    pub text: Color,
    pub text_muted: Color,
    /// Color for input mode prompts and carets
    pub input_prompt: Color,
    pub error: Color,
    pub loading: Color,

    // === Diffs ===
    pub diff_added: Color,
    pub diff_removed: Color,
    pub diff_hunk: Color,

    // === Borders ===
    pub border: Color,
    pub border_warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            status_success: Color::Green,
            status_failed: Color::Red,
            status_running: Color::Cyan,
            status_manual: Color::Yellow,
            status_idle: Color::Gray,

            accent: Color::Cyan,
            key: Color::Magenta,
            text: Color::White,
            text_muted: Color::DarkGray,
            input_prompt: Color::Magenta,
            error: Color::Red,
            loading: Color::Yellow,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_hunk: Color::Cyan,

            border: Color::White,
            border_warning: Color::Yellow,
        }
    }

    pub fn pipeline_status_color(&self, status: PipelineStatus) -> Color {
        match status {
            PipelineStatus::Success => self.status_success,
            PipelineStatus::Failed => self.status_failed,
            PipelineStatus::Running => self.status_running,
            PipelineStatus::Manual => self.status_manual,
            PipelineStatus::Pending
            | PipelineStatus::Created
            | PipelineStatus::Canceled
            | PipelineStatus::Skipped
            | PipelineStatus::Unknown => self.status_idle,
        }
    }

    pub fn job_status_color(&self, status: JobStatus) -> Color {
        match status {
            JobStatus::Success => self.status_success,
            JobStatus::Failed => self.status_failed,
            JobStatus::Running | JobStatus::Preparing => self.status_running,
            JobStatus::Manual | JobStatus::Scheduled | JobStatus::WaitingForResource => {
                self.status_manual
            }
            _ => self.status_idle,
        }
    }

    pub fn mr_state_color(&self, state: MrState) -> Color {
        match state {
            MrState::Opened => self.status_running,
            MrState::Merged => self.status_success,
            MrState::Closed => self.status_failed,
            MrState::Locked | MrState::Unknown => self.status_idle,
        }
    }

    /// Style for a line of the log or merge request text views
    pub fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Plain => Style::default().fg(self.text),
            LineKind::Title => self.header_style(),
            LineKind::Muted => self.muted_style(),
            LineKind::TabBar => Style::default().fg(self.key).add_modifier(Modifier::BOLD),
            LineKind::FileHeader => Style::default().fg(self.text).add_modifier(Modifier::BOLD),
            LineKind::Hunk => Style::default().fg(self.diff_hunk),
            LineKind::Added => Style::default().fg(self.diff_added),
            LineKind::Removed => Style::default().fg(self.diff_removed),
        }
    }

    // === Style Builders ===

    /// Style for headers/titles
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for a hotkey in hint lines
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.key).add_modifier(Modifier::BOLD)
    }

    /// Style for input prompts
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_prompt)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn active_tab_style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.key)
            .add_modifier(Modifier::BOLD)
    }
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
