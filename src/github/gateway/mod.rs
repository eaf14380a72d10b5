//! Gateways for talking to the GitHub API.
//!
//! The trait-based design enables mocking in tests while the Octocrab and
//! reqwest implementations handle real HTTP requests.

mod client;
mod detail;
mod error_mapping;
mod listing;

pub use detail::OctocrabDetailGateway;
pub use listing::OctocrabListingGateway;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::DeckError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{PullRequest, PullRequestDetail};

/// State filter accepted by the pull request listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestState {
    /// Open pull requests only.
    Open,
    /// Closed (including merged) pull requests only.
    Closed,
    /// Both open and closed pull requests.
    #[default]
    All,
}

impl PullRequestState {
    /// Query parameter value for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestState {
    type Err = DeckError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(DeckError::Configuration {
                message: format!("unknown pull request state '{other}' (use open, closed, or all)"),
            }),
        }
    }
}

/// Gateway for paginated listing and server-side search of pull requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// Fetch one page of pull requests filtered by state.
    ///
    /// An empty page signals that no further pages exist.
    async fn list_pull_requests(
        &self,
        locator: &RepositoryLocator,
        page: u32,
        state: PullRequestState,
        per_page: u8,
    ) -> Result<Vec<PullRequest>, DeckError>;

    /// Search pull requests in the repository by free-text query.
    async fn search_pull_requests(
        &self,
        locator: &RepositoryLocator,
        query: &str,
    ) -> Result<Vec<PullRequest>, DeckError>;

    /// Fetch the listing entry for a single pull request by number.
    async fn get_pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequest, DeckError>;
}

/// Gateway for per-pull-request detail and repository content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DetailGateway: Send + Sync {
    /// Fetch metadata, commits, review comments, and the diff for one
    /// pull request, batched with `try_join!`.
    ///
    /// Any sub-fetch failing aborts the whole aggregation.
    async fn pull_request_detail(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequestDetail, DeckError>;

    /// Fetch the raw README text. A missing README is a hard failure.
    async fn readme(&self, locator: &RepositoryLocator) -> Result<String, DeckError>;
}
