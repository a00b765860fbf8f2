//! Terminal UI module
//!
//! Terminal setup and teardown plus the top-level render function that draws
//! an [`AppState`] with Ratatui.

pub mod header;
pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;

pub use header::{Breadcrumb, Header};
pub use layout::{Hint, ScreenLayout};
pub use theme::{theme, Theme};

use anyhow::Result;
use crossterm::{
    event::{self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::{self, stdout, Write};
use std::time::Duration;

use crate::app::{AppState, View};

/// Terminal UI wrapper
///
/// Handles terminal setup, teardown, and provides the rendering surface.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// Whether keyboard enhancement (press/release reporting) is enabled
    keyboard_enhancement_enabled: bool,
    active: bool,
}

/// Error handler for terminal cleanup operations
/// Used during both normal exit and panic/drop scenarios
enum ErrorHandler {
    /// Log errors via tracing (normal exit)
    Tracing,
    /// Print errors to stderr (panic/drop, tracing may be unavailable)
    Stderr,
}

impl ErrorHandler {
    fn handle(&self, context: &str, error: impl std::fmt::Display) {
        match self {
            ErrorHandler::Tracing => tracing::warn!("{}: {}", context, error),
            ErrorHandler::Stderr => eprintln!("TUI teardown: {}: {}", context, error),
        }
    }
}

/// Disable keyboard enhancement and drain any pending terminal responses
fn disable_keyboard_enhancement(handler: &ErrorHandler) {
    if let Err(e) = stdout().execute(PopKeyboardEnhancementFlags) {
        handler.handle("failed to pop keyboard enhancement flags", e);
    }
    if let Err(e) = stdout().flush() {
        handler.handle("failed to flush stdout after keyboard enhancement", e);
    }
    // Drain any pending terminal responses (CSI u sequences)
    while event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = event::read();
    }
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            keyboard_enhancement_enabled: false,
            active: false,
        })
    }

    /// Enter TUI mode (raw mode + alternate screen)
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        self.active = true;

        // Key release events are filtered out by the input layer
        if supports_keyboard_enhancement().unwrap_or(false)
            && stdout()
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok()
        {
            self.keyboard_enhancement_enabled = true;
        }

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Exit TUI mode (restore terminal)
    pub fn exit(&mut self) -> Result<()> {
        tracing::debug!("Starting TUI exit sequence");

        // Pop keyboard enhancement FIRST (while still in raw mode)
        if self.keyboard_enhancement_enabled {
            disable_keyboard_enhancement(&ErrorHandler::Tracing);
            self.keyboard_enhancement_enabled = false;
        }

        self.terminal.show_cursor()?;
        stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.active = false;

        tracing::debug!("TUI exit sequence completed");
        Ok(())
    }

    pub fn size(&self) -> Result<Rect> {
        Ok(self.terminal.size()?)
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        // During drop, tracing may not be available, so errors go to stderr
        let handler = ErrorHandler::Stderr;

        if self.keyboard_enhancement_enabled {
            disable_keyboard_enhancement(&handler);
        }
        if let Err(e) = self.terminal.show_cursor() {
            handler.handle("failed to show cursor", e);
        }
        if let Err(e) = stdout().execute(LeaveAlternateScreen) {
            handler.handle("failed to leave alternate screen", e);
        }
        if let Err(e) = disable_raw_mode() {
            handler.handle("failed to disable raw mode", e);
        }
    }
}

/// Footer hints for a view
pub fn hints(view: View) -> &'static [Hint] {
    match view {
        View::Projects => &[
            ("↑↓", "navigate"),
            ("Enter", "select"),
            ("m", "MRs"),
            ("a", "add"),
            ("d", "delete"),
            ("Tab", "next tab"),
            ("q", "quit"),
        ],
        View::Pipelines => &[
            ("↑↓", "navigate"),
            ("fn↑↓", "page"),
            ("Enter", "jobs"),
            ("c", "commits"),
            ("/", "filter"),
            ("l", "limit"),
            ("Tab", "next tab"),
            ("q", "quit"),
        ],
        View::Jobs => &[
            ("↑↓", "navigate"),
            ("Enter", "log"),
            ("r", "run/retry"),
            ("c", "cancel"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        View::Log => &[("↑↓", "scroll"), ("Esc", "back"), ("q", "quit")],
        View::MergeRequests => &[
            ("↑↓", "navigate"),
            ("Enter", "detail"),
            ("n", "new MR"),
            ("/", "filter"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        View::MergeRequestCreate => &[
            ("Tab/↑↓", "navigate"),
            ("Enter", "next/toggle"),
            ("Ctrl+S", "submit"),
            ("Esc", "cancel"),
        ],
        View::MergeRequestDetail => &[
            ("↑↓", "scroll"),
            ("Tab", "diff/comments"),
            ("r", "refresh"),
            ("a", "approve"),
            ("m", "merge"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        View::Commits => &[("↑↓", "navigate"), ("Esc", "back"), ("q", "quit")],
    }
}

/// Draw the whole screen for `state`
pub fn render(frame: &mut Frame, state: &AppState) {
    let breadcrumb: Breadcrumb = state.breadcrumb.iter().cloned().collect();
    let status = if state.is_loading() {
        state.loading_status.as_deref()
    } else {
        None
    };
    let header = Header::new(state.view, breadcrumb).with_status(status);

    let areas = ScreenLayout::new(frame.size())
        .with_header(header)
        .with_hints(hints(state.view))
        .with_error(state.error.as_deref())
        .render(frame);
    let content = areas.content;

    match state.view {
        View::Projects => views::render_projects(frame, content, &state.projects),
        View::Pipelines => views::render_pipelines(
            frame,
            content,
            &state.pipelines,
            state.settings.pipeline_limit,
        ),
        View::Jobs => views::render_jobs(
            frame,
            content,
            &state.jobs,
            state.selected_pipeline.as_ref(),
        ),
        View::Log => views::render_log(frame, content, &state.log),
        View::MergeRequests => views::render_merge_requests(
            frame,
            content,
            &state.merge_requests,
            state.loading_status.as_deref(),
        ),
        View::MergeRequestDetail => views::render_mr_detail(frame, content, &state.mr_detail),
        View::MergeRequestCreate => views::render_mr_create(frame, content, &state.mr_create),
        View::Commits => views::render_commits(frame, content, &state.commits),
    }

    if let Some(dialog) = &state.confirm {
        views::render_confirm_dialog(frame, frame.size(), dialog);
    }
}
