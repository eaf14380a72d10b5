//! Git remote URL parsing.
//!
//! Extracts `owner/name` from the URL shapes git remotes commonly use. The
//! host is not inspected: enterprise installations and mirrors resolve the
//! same way, with the API base supplied separately through configuration.

use super::error::LocalDiscoveryError;

/// Owner and repository name parsed from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name with any `.git` suffix stripped.
    pub name: String,
}

/// Parses a Git remote URL and extracts the owner and repository name.
///
/// Supports the following URL formats:
/// - SSH SCP-style: `git@host:owner/repo.git`
/// - SSH with protocol: `ssh://git@host/owner/repo.git`
/// - HTTPS: `https://host/owner/repo.git`
/// - HTTPS without suffix: `https://host/owner/repo`
///
/// # Errors
///
/// Returns `LocalDiscoveryError::InvalidRemoteUrl` if the URL does not
/// contain an `owner/name` path.
pub fn parse_remote_url(url: &str) -> Result<RemoteRepo, LocalDiscoveryError> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(LocalDiscoveryError::InvalidRemoteUrl {
            url: url.to_owned(),
        });
    }

    if let Some(repo) = try_parse_scp_style(trimmed) {
        return Ok(repo);
    }

    if let Some(repo) = try_parse_url_style(trimmed) {
        return Ok(repo);
    }

    Err(LocalDiscoveryError::InvalidRemoteUrl {
        url: url.to_owned(),
    })
}

/// Attempts to parse SCP-style SSH URL: `git@host:owner/repo.git`
fn try_parse_scp_style(url: &str) -> Option<RemoteRepo> {
    let at_pos = url.find('@')?;
    let colon_pos = url.find(':')?;

    // Colon must come after @, and :// marks a URL-style remote.
    if colon_pos <= at_pos {
        return None;
    }
    if url.get(colon_pos..colon_pos.saturating_add(3)) == Some("://") {
        return None;
    }

    let path = url.get(colon_pos.saturating_add(1)..)?;
    extract_owner_repo_from_path(path)
}

/// Attempts to parse URL-style remote: `https://host/owner/repo.git`
fn try_parse_url_style(url: &str) -> Option<RemoteRepo> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str()?;
    let path_stripped = parsed.path().strip_prefix('/')?;
    extract_owner_repo_from_path(path_stripped)
}

/// Extracts owner and repository from a path like `owner/repo.git`.
fn extract_owner_repo_from_path(raw_path: &str) -> Option<RemoteRepo> {
    let trimmed_path = raw_path.trim_matches('/');

    if trimmed_path.is_empty() {
        return None;
    }

    let mut parts = trimmed_path.split('/');
    let owner = parts.next()?;
    let repo_with_suffix = parts.next()?;

    // Only owner/repo, allowing an empty trailing part from a trailing slash.
    if parts.next().is_some_and(|extra| !extra.is_empty()) {
        return None;
    }

    if owner.is_empty() || repo_with_suffix.is_empty() {
        return None;
    }

    let name = repo_with_suffix
        .strip_suffix(".git")
        .unwrap_or(repo_with_suffix);
    if name.is_empty() {
        return None;
    }

    Some(RemoteRepo {
        owner: owner.to_owned(),
        name: name.to_owned(),
    })
}
