//! Message types for the picker and panel update loops.

use crate::github::gateway::PullRequestState;
use crate::github::models::PullRequest;

/// Messages driving the pull request picker.
#[derive(Debug)]
pub enum PickerMsg {
    /// Move the cursor up one row.
    CursorUp,
    /// Move the cursor down one row.
    CursorDown,
    /// Activate the row under the cursor.
    Accept,
    /// Close the picker without a selection.
    Dismiss,
    /// One character appended to the filter field.
    FilterInput(char),
    /// One character removed from the end of the filter field.
    FilterBackspace,
    /// The debounce timer armed for `generation` elapsed.
    DebounceElapsed {
        /// Keystroke generation the timer belongs to.
        generation: u64,
    },
    /// A listing page arrived.
    PageLoaded {
        /// Page number that was fetched.
        page: u32,
        /// Items on the page; empty means the listing is exhausted.
        items: Vec<PullRequest>,
    },
    /// A listing page fetch failed.
    LoadFailed(String),
    /// A search request completed.
    SearchFinished {
        /// Search generation the result belongs to.
        generation: u64,
        /// Matching pull requests.
        items: Vec<PullRequest>,
    },
    /// A search request failed.
    SearchFailed {
        /// Search generation the failure belongs to.
        generation: u64,
        /// User-facing error description.
        message: String,
    },
    /// The terminal was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Messages driving the side-panel tree.
#[derive(Debug)]
pub enum PanelMsg {
    /// Move the cursor up one row.
    CursorUp,
    /// Move the cursor down one row.
    CursorDown,
    /// Activate the row under the cursor.
    Accept,
    /// Close the panel without a selection.
    Dismiss,
    /// Discard cached children and re-request them.
    Refresh,
    /// Children for one category arrived.
    ChildrenLoaded {
        /// Category the children belong to.
        state: PullRequestState,
        /// Pull requests in that category.
        items: Vec<PullRequest>,
    },
    /// Re-fetched children for the expanded categories arrived.
    RefreshFinished {
        /// Per-category outcome, in fetch order.
        results: Vec<(PullRequestState, Result<Vec<PullRequest>, String>)>,
    },
    /// A category fetch failed.
    ChildrenFailed {
        /// Category whose fetch failed.
        state: PullRequestState,
        /// User-facing error description.
        message: String,
    },
    /// The terminal was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}
