//! Identity wrappers and API path construction for repository operations.

use std::fmt;

use url::Url;

use crate::error::DeckError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, DeckError> {
        if value.is_empty() {
            return Err(DeckError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, DeckError> {
        if value.is_empty() {
            return Err(DeckError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Bearer token used against the GitHub or OpenAI APIs.
///
/// The wrapped value is never printed by `Debug` so tokens cannot leak into
/// logs or error output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token value, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::BlankToken`] when the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, DeckError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DeckError::BlankToken);
        }
        Ok(Self(value))
    }

    /// Borrow the token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// A GitHub repository plus the API base it should be queried against.
///
/// The API base comes from configuration (`github_api_base_url`), which is
/// how enterprise or proxied endpoints are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator from owner and repository name strings.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::MissingPathSegments`] when owner or repo is
    /// empty, or [`DeckError::InvalidUrl`] when the API base cannot be
    /// parsed.
    pub fn new(owner: &str, repo: &str, api_base: &str) -> Result<Self, DeckError> {
        let owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base =
            Url::parse(api_base).map_err(|error| DeckError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL for this repository.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/name` form used in messages and search qualifiers.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    /// API path for listing pull requests.
    pub(crate) fn pulls_path(&self) -> String {
        format!("/repos/{}/pulls", self.slug())
    }

    /// API path for a single pull request.
    pub(crate) fn pull_path(&self, number: u64) -> String {
        format!("/repos/{}/pulls/{number}", self.slug())
    }

    /// API path for a pull request's commits.
    pub(crate) fn commits_path(&self, number: u64) -> String {
        format!("/repos/{}/pulls/{number}/commits", self.slug())
    }

    /// API path for a pull request's review comments.
    pub(crate) fn review_comments_path(&self, number: u64) -> String {
        format!("/repos/{}/pulls/{number}/comments", self.slug())
    }

    /// API path for the repository README.
    pub(crate) fn readme_path(&self) -> String {
        format!("/repos/{}/readme", self.slug())
    }

    /// Search qualifier restricting issue search to this repository's PRs.
    pub(crate) fn search_qualifier(&self, query: &str) -> String {
        format!("repo:{} is:pr {query}", self.slug())
    }

    /// Absolute URL for a path, preserving any path prefix on the API base.
    pub(crate) fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.api_base.as_str().trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiToken, RepositoryLocator};
    use crate::error::DeckError;

    #[test]
    fn locator_builds_expected_api_paths() {
        let locator = RepositoryLocator::new("acme", "widgets", "https://api.github.com")
            .expect("locator should build");

        assert_eq!(locator.slug(), "acme/widgets");
        assert_eq!(locator.pulls_path(), "/repos/acme/widgets/pulls");
        assert_eq!(locator.pull_path(42), "/repos/acme/widgets/pulls/42");
        assert_eq!(
            locator.review_comments_path(42),
            "/repos/acme/widgets/pulls/42/comments"
        );
        assert_eq!(locator.readme_path(), "/repos/acme/widgets/readme");
    }

    #[test]
    fn locator_rejects_empty_segments() {
        let error = RepositoryLocator::new("", "widgets", "https://api.github.com")
            .expect_err("empty owner should be rejected");
        assert_eq!(error, DeckError::MissingPathSegments);
    }

    #[test]
    fn absolute_url_preserves_base_path_prefix() {
        let locator = RepositoryLocator::new("acme", "widgets", "https://ghe.example.com/api/v3/")
            .expect("locator should build");

        assert_eq!(
            locator.absolute_url("/repos/acme/widgets/readme"),
            "https://ghe.example.com/api/v3/repos/acme/widgets/readme"
        );
    }

    #[test]
    fn search_qualifier_scopes_query_to_repository() {
        let locator = RepositoryLocator::new("acme", "widgets", "https://api.github.com")
            .expect("locator should build");

        assert_eq!(
            locator.search_qualifier("caching"),
            "repo:acme/widgets is:pr caching"
        );
    }

    #[test]
    fn api_token_rejects_blank_values() {
        assert_eq!(
            ApiToken::new("   ").expect_err("blank token should be rejected"),
            DeckError::BlankToken
        );
    }

    #[test]
    fn api_token_debug_redacts_the_value() {
        let token = ApiToken::new("ghp_secret").expect("token should be valid");
        assert_eq!(format!("{token:?}"), "ApiToken(<redacted>)");
    }
}
