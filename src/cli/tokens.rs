//! Prompting for and persisting API credentials.

use std::io::{self, Write};

use prdeck::secrets::{GITHUB_TOKEN_KEY, OPENAI_KEY_KEY, SecretStore};
use prdeck::{ApiToken, DeckError};

use super::prompt::prompt_secret;

/// Prompts for the GitHub personal access token and stores it.
///
/// # Errors
///
/// Returns an error when the prompt fails, the entered value is blank, or
/// the store cannot be written.
pub fn set_github_token() -> Result<(), DeckError> {
    store_prompted(GITHUB_TOKEN_KEY, "Enter your GitHub Personal Access Token")
}

/// Prompts for the OpenAI API key and stores it.
///
/// # Errors
///
/// Returns an error when the prompt fails, the entered value is blank, or
/// the store cannot be written.
pub fn set_openai_key() -> Result<(), DeckError> {
    store_prompted(OPENAI_KEY_KEY, "Enter your OpenAI API Key")
}

fn store_prompted(key: &str, label: &str) -> Result<(), DeckError> {
    let store = SecretStore::open_default()?;
    let mut stderr = io::stderr().lock();

    let Some(value) = prompt_secret(label)? else {
        writeln!(stderr, "Cancelled; nothing saved.").map_err(write_error)?;
        return Ok(());
    };

    // Reject blank input before it reaches the store.
    let token = ApiToken::new(value)?;
    store.store(key, token.as_str())?;

    writeln!(stderr, "Saved to {}.", store.path()).map_err(write_error)
}

/// Returns the stored secret under `key`, prompting for it when absent.
///
/// A value entered at the prompt is persisted before it is returned, so
/// the next run finds it without asking again. Declining the prompt yields
/// `missing`.
pub(crate) fn resolve_secret(
    store: &SecretStore,
    key: &str,
    label: &str,
    missing: DeckError,
) -> Result<ApiToken, DeckError> {
    if let Some(value) = store.get(key)? {
        return ApiToken::new(value);
    }

    let Some(entered) = prompt_secret(label)? else {
        return Err(missing);
    };
    let token = ApiToken::new(entered)?;
    store.store(key, token.as_str())?;
    Ok(token)
}

fn write_error(error: io::Error) -> DeckError {
    DeckError::Io {
        message: error.to_string(),
    }
}
