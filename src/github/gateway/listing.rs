//! Octocrab-backed gateway for listing and searching pull requests.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::DeckError;
use crate::github::locator::{ApiToken, RepositoryLocator};
use crate::github::models::{ApiPullRequest, ApiSearchResults, PullRequest};

use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::{ListingGateway, PullRequestState};

/// Octocrab-backed listing gateway.
pub struct OctocrabListingGateway {
    client: Octocrab,
}

impl OctocrabListingGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a gateway authenticated with the given token against the
    /// locator's API base.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::InvalidUrl` when the base URI cannot be parsed or
    /// `DeckError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &ApiToken, locator: &RepositoryLocator) -> Result<Self, DeckError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ListingGateway for OctocrabListingGateway {
    async fn list_pull_requests(
        &self,
        locator: &RepositoryLocator,
        page: u32,
        state: PullRequestState,
        per_page: u8,
    ) -> Result<Vec<PullRequest>, DeckError> {
        validate_pagination_params(page, per_page)?;

        let page_str = page.to_string();
        let per_page_str = per_page.to_string();
        let query_params = [
            ("state", state.as_str()),
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];

        let items: Vec<ApiPullRequest> = self
            .client
            .get(locator.pulls_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list pulls", &error))?;

        Ok(items.into_iter().map(ApiPullRequest::into).collect())
    }

    async fn search_pull_requests(
        &self,
        locator: &RepositoryLocator,
        query: &str,
    ) -> Result<Vec<PullRequest>, DeckError> {
        let qualifier = locator.search_qualifier(query);
        let query_params = [("q", qualifier.as_str())];

        let results: ApiSearchResults = self
            .client
            .get("/search/issues", Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("search pulls", &error))?;

        Ok(results.items.into_iter().map(ApiPullRequest::into).collect())
    }

    async fn get_pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequest, DeckError> {
        let item = self
            .client
            .get::<ApiPullRequest, _, ()>(locator.pull_path(number), None)
            .await
            .map_err(|error| map_octocrab_error("fetch pull", &error))?;

        Ok(item.into())
    }
}

fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), DeckError> {
    if page == 0 {
        return Err(DeckError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 {
        return Err(DeckError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > 100 {
        return Err(DeckError::InvalidPagination {
            message: "per_page must not exceed 100".to_owned(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::OctocrabListingGateway;
    use crate::error::DeckError;
    use crate::github::gateway::{ListingGateway, PullRequestState};
    use crate::github::locator::{ApiToken, RepositoryLocator};

    fn gateway_for(server_uri: &str) -> (OctocrabListingGateway, RepositoryLocator) {
        let locator = RepositoryLocator::new("owner", "repo", server_uri)
            .expect("should create repository locator");
        let token = ApiToken::new("valid-token").expect("token should be valid");
        let gateway =
            OctocrabListingGateway::for_token(&token, &locator).expect("should create gateway");
        (gateway, locator)
    }

    #[tokio::test]
    async fn list_pull_requests_sends_state_and_pagination_params() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server.uri());

        let response = ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "number": 12,
            "title": "Add caching layer",
            "body": "Speeds up repeated lookups.",
            "user": { "login": "octocat" }
        }]));

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("state", "all"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "50"))
            .respond_with(response)
            .mount(&server)
            .await;

        let items = gateway
            .list_pull_requests(&locator, 2, PullRequestState::All, 50)
            .await
            .expect("request should succeed");

        assert_eq!(items.len(), 1);
        let first = items.first().expect("should have first item");
        assert_eq!(first.number, 12);
        assert_eq!(first.author, "octocat");
        assert_eq!(first.label(), "#12: Add caching layer");
    }

    #[tokio::test]
    async fn list_pull_requests_returns_empty_page_past_the_end() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server.uri());

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("page", "9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let items = gateway
            .list_pull_requests(&locator, 9, PullRequestState::All, 30)
            .await
            .expect("request should succeed");

        assert!(items.is_empty(), "expected empty page, got {items:?}");
    }

    #[tokio::test]
    async fn list_pull_requests_rejects_invalid_pagination_params() {
        let (gateway, locator) = gateway_for("https://api.github.com");

        let error = gateway
            .list_pull_requests(&locator, 0, PullRequestState::All, 30)
            .await
            .expect_err("page zero should fail");
        assert!(
            matches!(error, DeckError::InvalidPagination { .. }),
            "expected InvalidPagination, got {error:?}"
        );

        let error = gateway
            .list_pull_requests(&locator, 1, PullRequestState::All, 101)
            .await
            .expect_err("per_page over maximum should fail");
        assert!(
            matches!(error, DeckError::InvalidPagination { .. }),
            "expected InvalidPagination, got {error:?}"
        );
    }

    #[tokio::test]
    async fn list_pull_requests_surfaces_server_errors_with_status() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server.uri());

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "boom"
            })))
            .mount(&server)
            .await;

        let error = gateway
            .list_pull_requests(&locator, 1, PullRequestState::All, 30)
            .await
            .expect_err("server error should fail");

        let message = error.to_string();
        assert!(message.contains("500"), "missing status in: {message}");
    }

    #[tokio::test]
    async fn get_pull_request_fetches_a_single_entry() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server.uri());

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "number": 42,
                "title": "Add caching layer",
                "body": null,
                "user": { "login": "octocat" }
            })))
            .mount(&server)
            .await;

        let item = gateway
            .get_pull_request(&locator, 42)
            .await
            .expect("request should succeed");
        assert_eq!(item.label(), "#42: Add caching layer");
    }

    #[tokio::test]
    async fn search_scopes_the_query_to_the_repository() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server.uri());

        let response = ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "number": 7,
                "title": "Fix flaky test",
                "user": { "login": "alice" }
            }]
        }));

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "repo:owner/repo is:pr flaky"))
            .respond_with(response)
            .mount(&server)
            .await;

        let items = gateway
            .search_pull_requests(&locator, "flaky")
            .await
            .expect("search should succeed");

        assert_eq!(items.len(), 1);
        assert_eq!(
            items.first().expect("should have first item").number,
            7
        );
    }
}
