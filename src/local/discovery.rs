//! Local Git repository discovery.
//!
//! Walks upward from a starting directory to find the enclosing repository,
//! then scans its remotes in configuration order for the first URL that
//! parses as `owner/name`.

use std::path::Path;

use git2::Repository;

use super::error::LocalDiscoveryError;
use super::remote::{RemoteRepo, parse_remote_url};

/// Discovers the repository containing `start_path` and resolves its
/// `owner/name` from the first parseable remote URL.
///
/// Remotes are tried in the order git reports them, using the fetch URL and
/// falling back to the push URL. Remotes whose URLs do not parse are skipped
/// rather than failing discovery.
///
/// # Errors
///
/// Returns an error if:
/// - The path is not within a Git repository (`NotARepository`)
/// - The repository has no remotes configured (`NoRemotes`)
/// - No remote URL parses as `owner/name` (`NoUsableRemote`)
pub fn discover_repository(start_path: &Path) -> Result<RemoteRepo, LocalDiscoveryError> {
    let repo = open_repository(start_path)?;
    first_usable_remote(&repo)
}

fn open_repository(start_path: &Path) -> Result<Repository, LocalDiscoveryError> {
    Repository::discover(start_path).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })
}

fn first_usable_remote(repo: &Repository) -> Result<RemoteRepo, LocalDiscoveryError> {
    let remotes = repo.remotes()?;
    if remotes.is_empty() {
        return Err(LocalDiscoveryError::NoRemotes);
    }

    for name in remotes.iter().flatten() {
        let Ok(remote) = repo.find_remote(name) else {
            continue;
        };
        let Some(url) = remote.url().or_else(|| remote.pushurl()) else {
            continue;
        };
        match parse_remote_url(url) {
            Ok(parsed) => return Ok(parsed),
            Err(error) => {
                tracing::debug!(remote = name, url, %error, "skipping unparseable remote");
            }
        }
    }

    Err(LocalDiscoveryError::NoUsableRemote)
}

#[cfg(test)]
mod tests {
    use git2::Repository;
    use tempfile::TempDir;

    use super::discover_repository;
    use crate::local::error::LocalDiscoveryError;

    fn init_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().expect("should create temp dir");
        let repo = Repository::init(dir.path()).expect("should init repository");
        (dir, repo)
    }

    #[test]
    fn discovery_fails_outside_a_repository() {
        let dir = TempDir::new().expect("should create temp dir");
        let error =
            discover_repository(dir.path()).expect_err("discovery should fail without a repo");
        assert_eq!(error, LocalDiscoveryError::NotARepository);
    }

    #[test]
    fn discovery_fails_without_remotes() {
        let (dir, _repo) = init_repo();
        let error =
            discover_repository(dir.path()).expect_err("discovery should fail without remotes");
        assert_eq!(error, LocalDiscoveryError::NoRemotes);
    }

    #[test]
    fn discovery_uses_the_first_parseable_remote() {
        let (dir, repo) = init_repo();
        repo.remote("origin", "https://github.com/acme/widgets.git")
            .expect("should add remote");

        let found = discover_repository(dir.path()).expect("discovery should succeed");
        assert_eq!(found.owner, "acme");
        assert_eq!(found.name, "widgets");
    }

    #[test]
    fn discovery_skips_remotes_it_cannot_parse() {
        let (dir, repo) = init_repo();
        repo.remote("mirror", "https://example.com/tarballs")
            .expect("should add remote");
        repo.remote("upstream", "git@github.com:acme/widgets.git")
            .expect("should add remote");

        let found = discover_repository(dir.path()).expect("discovery should succeed");
        assert_eq!(found.owner, "acme");
        assert_eq!(found.name, "widgets");
    }

    #[test]
    fn discovery_fails_when_no_remote_parses() {
        let (dir, repo) = init_repo();
        repo.remote("mirror", "https://example.com/tarballs")
            .expect("should add remote");

        let error =
            discover_repository(dir.path()).expect_err("discovery should fail without usable URL");
        assert_eq!(error, LocalDiscoveryError::NoUsableRemote);
    }
}
