//! GitHub pull request listing, search, and detail retrieval.
//!
//! This module wraps Octocrab for the JSON endpoints and reqwest for the
//! raw content negotiation (pull request diff, README). Errors are mapped
//! into [`DeckError`](crate::error::DeckError) variants carrying the HTTP
//! status and reason so callers can surface precise failures.

pub mod gateway;
pub mod locator;
pub mod models;

pub use gateway::{
    DetailGateway, ListingGateway, OctocrabDetailGateway, OctocrabListingGateway,
    PullRequestState,
};
pub use locator::{ApiToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{CommitInfo, PullRequest, PullRequestDetail, ReviewComment};

#[cfg(test)]
pub use gateway::{MockDetailGateway, MockListingGateway};
