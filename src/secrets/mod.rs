//! Credential persistence for the GitHub token and the OpenAI API key.
//!
//! Secrets live in a JSON map under the user's config directory, created
//! with owner-only permissions. Callers look a key up first and fall back to
//! prompting when it is absent; a value entered at the prompt is persisted
//! immediately so the next run finds it.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::DeckError;
use crate::files;

/// Storage key for the GitHub personal access token.
pub const GITHUB_TOKEN_KEY: &str = "github-token";

/// Storage key for the OpenAI API key.
pub const OPENAI_KEY_KEY: &str = "openai-api-key";

/// File-backed store holding named secrets as a JSON map.
#[derive(Debug, Clone)]
pub struct SecretStore {
    path: Utf8PathBuf,
}

impl SecretStore {
    /// Opens the store at its default location under the user's config
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Configuration`] when neither `XDG_CONFIG_HOME`
    /// nor `HOME` is set.
    pub fn open_default() -> Result<Self, DeckError> {
        let xdg = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty());
        let home = std::env::var("HOME").ok().filter(|v| !v.is_empty());

        let path = resolve_store_path(xdg.as_deref(), home.as_deref())?;
        Ok(Self { path })
    }

    /// Opens a store backed by an explicit file path.
    #[must_use]
    pub fn at_path(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Looks up a secret, returning `None` when it has not been stored.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Io`] when the store file cannot be read or
    /// [`DeckError::Configuration`] when it holds invalid JSON.
    pub fn get(&self, key: &str) -> Result<Option<String>, DeckError> {
        let map = self.load()?;
        Ok(map.get(key).cloned())
    }

    /// Stores a secret, replacing any previous value under the same key.
    ///
    /// The whole map is rewritten and the file is restricted to owner
    /// read/write.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Io`] when the store file cannot be written.
    pub fn store(&self, key: &str, value: &str) -> Result<(), DeckError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), value.to_owned());

        let serialised =
            serde_json::to_string_pretty(&map).map_err(|error| DeckError::Io {
                message: format!("failed to serialise credentials: {error}"),
            })?;

        files::write_text(&self.path, &serialised, "credentials")?;
        files::restrict_to_owner(&self.path, "credentials")
    }

    fn load(&self) -> Result<BTreeMap<String, String>, DeckError> {
        let Some(contents) = files::read_text_if_exists(&self.path, "credentials")? else {
            return Ok(BTreeMap::new());
        };

        serde_json::from_str(&contents).map_err(|error| DeckError::Configuration {
            message: format!(
                "credentials file '{path}' holds invalid JSON: {error}",
                path = self.path
            ),
        })
    }
}

/// Resolves the credentials file path from optional environment values.
///
/// This helper exists to keep environment-sensitive logic unit-testable
/// without mutating process environment variables in tests.
pub(crate) fn resolve_store_path(
    xdg_config_home: Option<&str>,
    home: Option<&str>,
) -> Result<Utf8PathBuf, DeckError> {
    if let Some(config_home) = xdg_config_home {
        return Ok(Utf8PathBuf::from(config_home)
            .join("prdeck")
            .join("credentials.json"));
    }

    if let Some(home_dir) = home {
        return Ok(Utf8PathBuf::from(home_dir)
            .join(".config")
            .join("prdeck")
            .join("credentials.json"));
    }

    Err(DeckError::Configuration {
        message: "unable to resolve credentials path: \
                  neither XDG_CONFIG_HOME nor HOME is set"
            .to_owned(),
    })
}
