//! View enum and navigation helpers
//!
//! Defines the current view being displayed and the fixed transition table
//! used by "back" and tab cycling.

use serde::Serialize;

/// Current view being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum View {
    /// Tracked projects with pipeline counters
    Projects,
    /// Pipelines of all tracked projects (landing page)
    #[default]
    Pipelines,
    /// Jobs of the selected pipeline
    Jobs,
    /// Trace of the selected job
    Log,
    /// Open merge requests of all tracked projects
    MergeRequests,
    MergeRequestDetail,
    MergeRequestCreate,
    /// Commits on a pipeline's ref
    Commits,
}

/// Views reachable with Tab / Shift+Tab, in cycling order
pub const TAB_CYCLE: [View; 3] = [View::Projects, View::Pipelines, View::MergeRequests];

/// Tabs shown in the header: (hotkey, label, view)
pub const HEADER_TABS: [(char, &str, View); 5] = [
    ('1', "Projects", View::Projects),
    ('2', "Pipelines", View::Pipelines),
    ('3', "Jobs", View::Jobs),
    ('4', "Log", View::Log),
    ('5', "MRs", View::MergeRequests),
];

impl View {
    /// Get the parent view for navigation (Esc key)
    pub fn parent(&self) -> Option<View> {
        match self {
            View::Projects => None,
            View::Pipelines => Some(View::Projects),
            View::Jobs => Some(View::Pipelines),
            View::Log => Some(View::Jobs),
            View::MergeRequests => Some(View::Projects),
            View::MergeRequestDetail => Some(View::MergeRequests),
            View::MergeRequestCreate => Some(View::MergeRequests),
            View::Commits => Some(View::Pipelines),
        }
    }

    /// The top-level tab this view belongs to
    pub fn tab(&self) -> View {
        match self {
            View::Projects => View::Projects,
            View::Pipelines | View::Jobs | View::Log | View::Commits => View::Pipelines,
            View::MergeRequests | View::MergeRequestDetail | View::MergeRequestCreate => {
                View::MergeRequests
            }
        }
    }

    /// Next view in the tab cycle
    pub fn next_tab(&self) -> View {
        let idx = self.tab_index();
        TAB_CYCLE[(idx + 1) % TAB_CYCLE.len()]
    }

    /// Previous view in the tab cycle
    pub fn prev_tab(&self) -> View {
        let idx = self.tab_index();
        TAB_CYCLE[(idx + TAB_CYCLE.len() - 1) % TAB_CYCLE.len()]
    }

    fn tab_index(&self) -> usize {
        let tab = self.tab();
        TAB_CYCLE.iter().position(|v| *v == tab).unwrap_or(0)
    }

    /// Whether the header tab for `tab_view` is highlighted while in this view
    pub fn highlights(&self, tab_view: View) -> bool {
        match self {
            View::Commits => tab_view == View::Pipelines,
            View::MergeRequestDetail | View::MergeRequestCreate => {
                tab_view == View::MergeRequests
            }
            other => *other == tab_view,
        }
    }
}
