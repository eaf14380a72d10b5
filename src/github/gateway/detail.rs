//! Octocrab- and reqwest-backed gateway for pull request details.
//!
//! Metadata, commits, and review comments come through Octocrab as JSON.
//! The diff and the README need GitHub's raw media types, which Octocrab's
//! typed `get` cannot negotiate, so those two go through a plain reqwest
//! client with the appropriate `Accept` header.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;
use reqwest::header::ACCEPT;

use crate::error::DeckError;
use crate::github::locator::{ApiToken, RepositoryLocator};
use crate::github::models::{
    ApiCommit, ApiPullRequestDetail, ApiReviewComment, PullRequestDetail,
};

use super::client::build_octocrab_client;
use super::error_mapping::{map_http_status, map_octocrab_error};
use super::DetailGateway;

const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Octocrab-backed detail gateway with a reqwest side channel for raw
/// content negotiation.
pub struct OctocrabDetailGateway {
    client: Octocrab,
    http: reqwest::Client,
    token: ApiToken,
}

impl OctocrabDetailGateway {
    /// Builds a gateway authenticated with the given token against the
    /// locator's API base.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::InvalidUrl` when the base URI cannot be parsed or
    /// `DeckError::Api` when a client fails to construct.
    pub fn for_token(token: &ApiToken, locator: &RepositoryLocator) -> Result<Self, DeckError> {
        let client = build_octocrab_client(token, locator.api_base().as_str())?;
        let http = reqwest::Client::builder()
            .user_agent("prdeck")
            .build()
            .map_err(|error| DeckError::Api {
                message: format!("build client failed: {error}"),
            })?;

        Ok(Self {
            client,
            http,
            token: token.clone(),
        })
    }

    /// Fetches a raw-media-type resource, mapping any non-success status
    /// into a terminal error carrying status code and reason.
    async fn fetch_raw(
        &self,
        operation: &str,
        url: &str,
        media_type: &str,
    ) -> Result<String, DeckError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, media_type)
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|error| DeckError::Network {
                message: format!("{operation} failed: {error}"),
            })?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(map_http_status(operation, status));
        }

        response.text().await.map_err(|error| DeckError::Network {
            message: format!("{operation} failed: {error}"),
        })
    }
}

#[async_trait]
impl DetailGateway for OctocrabDetailGateway {
    async fn pull_request_detail(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequestDetail, DeckError> {
        let metadata = async {
            self.client
                .get::<ApiPullRequestDetail, _, ()>(locator.pull_path(number), None)
                .await
                .map_err(|error| map_octocrab_error("fetch pull", &error))
        };
        let commits = async {
            self.client
                .get::<Vec<ApiCommit>, _, ()>(locator.commits_path(number), None)
                .await
                .map_err(|error| map_octocrab_error("fetch commits", &error))
        };
        let comments = async {
            self.client
                .get::<Vec<ApiReviewComment>, _, ()>(locator.review_comments_path(number), None)
                .await
                .map_err(|error| map_octocrab_error("fetch comments", &error))
        };
        let diff_url = locator.absolute_url(&locator.pull_path(number));
        let diff = self.fetch_raw("fetch diff", &diff_url, DIFF_MEDIA_TYPE);

        let (metadata, commits, comments, diff) =
            tokio::try_join!(metadata, commits, comments, diff)?;

        Ok(PullRequestDetail {
            diff,
            state: metadata.state.unwrap_or_default(),
            merged: metadata.merged.unwrap_or(false),
            comments: comments.into_iter().map(ApiReviewComment::into).collect(),
            created_at: metadata.created_at,
            commits: commits.into_iter().map(ApiCommit::into).collect(),
        })
    }

    async fn readme(&self, locator: &RepositoryLocator) -> Result<String, DeckError> {
        self.fetch_raw(
            "fetch README",
            &locator.absolute_url(&locator.readme_path()),
            RAW_MEDIA_TYPE,
        )
        .await
    }
}
