//! Error types for local Git repository discovery.

use thiserror::Error;

/// Errors raised while locating the repository behind the working directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// The working directory is not inside a Git repository.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The repository has no remotes configured.
    #[error("repository has no remotes configured")]
    NoRemotes,

    /// None of the configured remotes carries a parseable `owner/name` URL.
    #[error("no remote URL could be parsed as owner/name")]
    NoUsableRemote,

    /// A remote URL could not be parsed.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The URL that failed to parse.
        url: String,
    },

    /// An underlying git operation failed.
    #[error("git operation failed: {message}")]
    Git {
        /// Description from the git library.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}
