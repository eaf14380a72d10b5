//! Error types shared across the slide generation pipeline.

use thiserror::Error;

/// Errors surfaced while resolving configuration, talking to GitHub, or
/// calling the slide generation endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    /// No repository could be determined from configuration or git remotes.
    #[error("could not determine a GitHub repository (configure --owner/--repo or run inside a clone)")]
    MissingRepository,

    /// The repository owner or name segment was empty.
    #[error("repository reference must match owner/name")]
    MissingPathSegments,

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The GitHub token was missing and the user declined to supply one.
    #[error("GitHub token is required to access pull requests")]
    MissingGitHubToken,

    /// The OpenAI API key was missing and the user declined to supply one.
    #[error("OpenAI API key is required to generate slides")]
    MissingOpenAiKey,

    /// A token value was blank.
    #[error("token value must not be blank")]
    BlankToken,

    /// The upstream service rejected the credentials.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Error detail returned with the 401/403 response.
        message: String,
    },

    /// The upstream service returned a non-success API response.
    #[error("API error: {message}")]
    Api {
        /// Status code, reason phrase, and any body detail.
        message: String,
    },

    /// Networking failed before a response was received.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or was inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The interactive UI failed to start or run.
    #[error("interface error: {message}")]
    Interface {
        /// Error detail from the terminal UI runtime.
        message: String,
    },
}
