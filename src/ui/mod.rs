//! Terminal user interface for choosing a pull request.
//!
//! Two models built on the bubbletea-rs Model-View-Update pattern:
//!
//! - [`PickerApp`]: a flat, incrementally loaded list with debounced
//!   server-side search. Pages append to an accumulated list with a
//!   "load more" row at the end while more pages may exist.
//! - [`PanelApp`]: a side-panel style tree with open and closed
//!   categories that lazily fetch their children.
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the repository locator and token are held in module-level
//! storage. Call [`set_ui_context`] before starting either program.

use std::sync::OnceLock;

use crate::error::DeckError;
use crate::github::gateway::{ListingGateway, OctocrabListingGateway, PullRequestState};
use crate::github::locator::{ApiToken, RepositoryLocator};
use crate::github::models::PullRequest;

pub mod input;
pub mod messages;
pub mod panel;
pub mod picker;

pub use panel::PanelApp;
pub use picker::PickerApp;

/// Global storage for the listing context.
///
/// Set before the TUI program starts and read by fetch commands issued from
/// `update()`.
static UI_CONTEXT: OnceLock<UiContext> = OnceLock::new();

/// Context required to fetch pull requests from GitHub.
struct UiContext {
    locator: RepositoryLocator,
    token: ApiToken,
    state: PullRequestState,
    per_page: u8,
}

/// Sets the listing context for the TUI programs.
///
/// Must be called before starting a bubbletea-rs program. Returns `true` if
/// the context was set, `false` if it was already set.
pub fn set_ui_context(
    locator: RepositoryLocator,
    token: ApiToken,
    state: PullRequestState,
    per_page: u8,
) -> bool {
    UI_CONTEXT
        .set(UiContext {
            locator,
            token,
            state,
            per_page,
        })
        .is_ok()
}

fn context() -> Result<&'static UiContext, DeckError> {
    UI_CONTEXT.get().ok_or_else(|| DeckError::Interface {
        message: "picker context not configured".to_owned(),
    })
}

/// Fetches one listing page using the stored context.
pub(crate) async fn fetch_page(page: u32) -> Result<Vec<PullRequest>, DeckError> {
    let context = context()?;
    let gateway = OctocrabListingGateway::for_token(&context.token, &context.locator)?;
    gateway
        .list_pull_requests(&context.locator, page, context.state, context.per_page)
        .await
}

/// Fetches one listing page with an explicit state filter, used by the
/// panel's category nodes.
pub(crate) async fn fetch_page_with_state(
    page: u32,
    state: PullRequestState,
) -> Result<Vec<PullRequest>, DeckError> {
    let context = context()?;
    let gateway = OctocrabListingGateway::for_token(&context.token, &context.locator)?;
    gateway
        .list_pull_requests(&context.locator, page, state, context.per_page)
        .await
}

/// Runs a server-side search using the stored context.
pub(crate) async fn run_search(query: String) -> Result<Vec<PullRequest>, DeckError> {
    let context = context()?;
    let gateway = OctocrabListingGateway::for_token(&context.token, &context.locator)?;
    gateway.search_pull_requests(&context.locator, &query).await
}
