//! Error mapping helpers for the GitHub gateway implementations.
//!
//! Every non-success response maps to a terminal error carrying the HTTP
//! status code and reason phrase; nothing here retries.

use http::StatusCode;

use crate::error::DeckError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> DeckError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            DeckError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            DeckError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return DeckError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    DeckError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success raw HTTP response status into a terminal error.
pub(super) fn map_http_status(operation: &str, status: StatusCode) -> DeckError {
    let reason = status.canonical_reason().unwrap_or("unknown");
    if is_auth_failure(status) {
        DeckError::Authentication {
            message: format!(
                "{operation} failed: GitHub returned {code} {reason}",
                code = status.as_u16()
            ),
        }
    } else {
        DeckError::Api {
            message: format!(
                "{operation} failed with status {code} {reason}",
                code = status.as_u16()
            ),
        }
    }
}
