//! Prdeck library crate turning GitHub pull requests into Marp slide decks.
//!
//! The library discovers the enclosing GitHub repository from git remotes,
//! lists and searches pull requests through trait-based gateways, assembles
//! a deterministic slide generation prompt from the pull request details and
//! the repository README, and sends it to an OpenAI-compatible
//! chat-completions endpoint. An interactive picker and a side panel over
//! open/closed pull requests are provided in the [`ui`] module.

pub mod config;
pub mod error;
pub mod files;
pub mod github;
pub mod local;
pub mod secrets;
pub mod slides;
pub mod ui;

pub use config::{DeckConfig, OperationMode};
pub use error::DeckError;
pub use github::{
    ApiToken, DetailGateway, ListingGateway, OctocrabDetailGateway, OctocrabListingGateway,
    PullRequest, PullRequestDetail, PullRequestState, RepositoryLocator,
};
pub use slides::{DeckStage, OpenAiConfig, OpenAiSlideGenerator, SlideGenerator, generate_deck};
