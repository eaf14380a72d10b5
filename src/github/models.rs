//! Data models for pull request listings, details, and commits.
//!
//! Types prefixed with `Api` are deserialisation targets for GitHub REST
//! payloads; they convert into the public domain types at the API boundary
//! so that no untyped JSON reaches the prompt templates.

use serde::Deserialize;

/// A pull request as shown in listings, search results, and the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number; the identity of the snapshot.
    pub number: u64,
    /// Title of the pull request.
    pub title: String,
    /// Body text; empty when the author wrote none.
    pub description: String,
    /// Author login, or `unknown` when GitHub omits the user.
    pub author: String,
}

impl PullRequest {
    /// `#<number>: <title>` form used by the picker and the panel.
    #[must_use]
    pub fn label(&self) -> String {
        format!("#{}: {}", self.number, self.title)
    }
}

/// One review comment attached to a pull request diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewComment {
    /// Author login, or `unknown`.
    pub author: String,
    /// Comment body; empty when GitHub omits it.
    pub body: String,
    /// Creation timestamp (ISO 8601), when present.
    pub created_at: Option<String>,
}

/// One commit on a pull request branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfo {
    /// Author login or git author name, or `unknown`.
    pub author: String,
    /// Commit timestamp (ISO 8601), when present.
    pub date: Option<String>,
    /// Full commit message.
    pub message: String,
}

/// Aggregated pull request details fetched once per generate action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestDetail {
    /// Unified diff text for the whole pull request.
    pub diff: String,
    /// State reported by GitHub (`open` or `closed`).
    pub state: String,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// Review comments in the order GitHub returns them.
    pub comments: Vec<ReviewComment>,
    /// Creation timestamp (ISO 8601), when present.
    pub created_at: Option<String>,
    /// Commits in the order GitHub returns them.
    pub commits: Vec<CommitInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

/// Listing/search item shape shared by `/pulls` and `/search/issues`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestDetail {
    pub(crate) state: Option<String>,
    pub(crate) merged: Option<bool>,
    pub(crate) created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewComment {
    pub(crate) user: Option<ApiUser>,
    pub(crate) body: Option<String>,
    pub(crate) created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) commit: ApiCommitInner,
    pub(crate) author: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitInner {
    pub(crate) author: Option<ApiCommitAuthor>,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitAuthor {
    pub(crate) name: Option<String>,
    pub(crate) date: Option<String>,
}

/// Envelope returned by `/search/issues`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiSearchResults {
    pub(crate) items: Vec<ApiPullRequest>,
}

fn login_or_unknown(user: Option<ApiUser>) -> String {
    user.and_then(|user| user.login)
        .unwrap_or_else(|| "unknown".to_owned())
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_default(),
            description: value.body.unwrap_or_default(),
            author: login_or_unknown(value.user),
        }
    }
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(value: ApiReviewComment) -> Self {
        Self {
            author: login_or_unknown(value.user),
            body: value.body.unwrap_or_default(),
            created_at: value.created_at,
        }
    }
}

impl From<ApiCommit> for CommitInfo {
    fn from(value: ApiCommit) -> Self {
        // Prefer the GitHub login; fall back to the git author name.
        let author = value
            .author
            .and_then(|user| user.login)
            .or_else(|| {
                value
                    .commit
                    .author
                    .as_ref()
                    .and_then(|author| author.name.clone())
            })
            .unwrap_or_else(|| "unknown".to_owned());

        Self {
            author,
            date: value.commit.author.and_then(|author| author.date),
            message: value.commit.message.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ApiCommit, ApiPullRequest, ApiSearchResults, CommitInfo, PullRequest};

    #[test]
    fn api_pull_request_deserialises_and_fills_defaults() {
        let value = json!({
            "number": 42,
            "title": "Add caching layer",
            "body": null,
            "user": null
        });

        let api: ApiPullRequest =
            serde_json::from_value(value).expect("ApiPullRequest should deserialise");
        let pr: PullRequest = api.into();

        assert_eq!(pr.number, 42);
        assert_eq!(pr.title, "Add caching layer");
        assert_eq!(pr.description, "");
        assert_eq!(pr.author, "unknown");
    }

    #[test]
    fn pull_request_label_matches_picker_format() {
        let pr = PullRequest {
            number: 7,
            title: "Fix flaky test".to_owned(),
            ..PullRequest::default()
        };
        assert_eq!(pr.label(), "#7: Fix flaky test");
    }

    #[test]
    fn api_commit_prefers_login_over_git_author_name() {
        let value = json!({
            "commit": {
                "author": { "name": "Grace Hopper", "date": "2025-01-01T00:00:00Z" },
                "message": "Add caching layer\n\nLonger explanation."
            },
            "author": { "login": "ghopper" }
        });

        let api: ApiCommit = serde_json::from_value(value).expect("ApiCommit should deserialise");
        let commit: CommitInfo = api.into();

        assert_eq!(commit.author, "ghopper");
        assert_eq!(commit.date.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert!(commit.message.starts_with("Add caching layer"));
    }

    #[test]
    fn api_commit_falls_back_to_git_author_name() {
        let value = json!({
            "commit": {
                "author": { "name": "Grace Hopper", "date": null },
                "message": "Tidy up"
            },
            "author": null
        });

        let api: ApiCommit = serde_json::from_value(value).expect("ApiCommit should deserialise");
        let commit: CommitInfo = api.into();

        assert_eq!(commit.author, "Grace Hopper");
    }

    #[test]
    fn search_results_unwrap_the_items_envelope() {
        let value = json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [{ "number": 9, "title": "Search hit", "user": { "login": "alice" } }]
        });

        let results: ApiSearchResults =
            serde_json::from_value(value).expect("ApiSearchResults should deserialise");
        assert_eq!(results.items.len(), 1);
    }
}
