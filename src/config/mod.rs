//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prdeck.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRDECK_OWNER`, `PRDECK_REPO`, and friends
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`, etc.
//!
//! # Configuration File
//!
//! Place `.prdeck.toml` in the current directory, home directory, or XDG
//! config directory with:
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! github_api_base_url = "https://ghe.example.com/api/v3"
//! model = "gpt-4o"
//! language = "Japanese"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::github::PullRequestState;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Prompt for and store the GitHub personal access token.
    SetGitHubToken,
    /// Prompt for and store the OpenAI API key.
    SetOpenAiKey,
    /// Generate a deck for an explicitly numbered pull request.
    GenerateFromNumber,
    /// Browse pull requests grouped by state in the side panel.
    Panel,
    /// Pick a pull request interactively, with search.
    Picker,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use prdeck::DeckConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DeckConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode();
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRDECK",
    discovery(
        dotfile_name = ".prdeck.toml",
        config_file_name = "prdeck.toml",
        app_name = "prdeck"
    )
)]
pub struct DeckConfig {
    /// Repository owner (e.g., "octocat").
    ///
    /// When unset, the owner is discovered from the local Git repository's
    /// remotes.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    ///
    /// When unset, the name is discovered from the local Git repository's
    /// remotes.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Pull request number to generate a deck for, skipping the picker.
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<u64>,

    /// Browses pull requests grouped by state instead of the flat picker.
    ///
    /// Note: Environment variable `PRDECK_PANEL` is not supported because
    /// `ortho_config` does not load boolean values from the environment.
    #[ortho_config()]
    pub panel: bool,

    /// Prompts for the GitHub personal access token and stores it.
    #[ortho_config()]
    pub set_github_token: bool,

    /// Prompts for the OpenAI API key and stores it.
    #[ortho_config()]
    pub set_openai_key: bool,

    /// Pull request state filter for listings: `open`, `closed`, or `all`.
    #[ortho_config()]
    pub state: Option<String>,

    /// Page size for pull request listings (1 to 100).
    #[ortho_config()]
    pub per_page: Option<u8>,

    /// Output path for the generated deck.
    ///
    /// Defaults to `pr-<number>-slides.md` in the current directory.
    #[ortho_config(cli_short = 'O')]
    pub output: Option<String>,

    /// Base URL for the GitHub API.
    ///
    /// Point this at a GitHub Enterprise installation's `/api/v3` endpoint
    /// when the repository does not live on github.com.
    #[ortho_config()]
    pub github_api_base_url: Option<String>,

    /// Base URL for the OpenAI-compatible chat API.
    #[ortho_config()]
    pub openai_base_url: Option<String>,

    /// Chat model used to generate slides.
    #[ortho_config(cli_short = 'm')]
    pub model: Option<String>,

    /// Language the slides are written in.
    #[ortho_config(cli_short = 'l')]
    pub language: Option<String>,
}

const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_LANGUAGE: &str = "Japanese";
const DEFAULT_PER_PAGE: u8 = 30;

impl DeckConfig {
    /// GitHub API base URL, defaulting to the public endpoint.
    #[must_use]
    pub fn github_api_base_url(&self) -> &str {
        self.github_api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_API_BASE_URL)
    }

    /// OpenAI API base URL, defaulting to the public endpoint.
    #[must_use]
    pub fn openai_base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }

    /// Chat model to use.
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Slide language.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Listing page size.
    #[must_use]
    pub fn per_page(&self) -> u8 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Listing state filter.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Configuration`] when the configured state is not
    /// `open`, `closed`, or `all`.
    pub fn listing_state(&self) -> Result<PullRequestState, DeckError> {
        match self.state.as_deref() {
            Some(value) => value.parse(),
            None => Ok(PullRequestState::default()),
        }
    }

    /// Output path for the deck generated for pull request `number`.
    #[must_use]
    pub fn output_path(&self, number: u64) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("pr-{number}-slides.md"))
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// Token storage flags win over generation so a stored credential can be
    /// replaced without generating anything; an explicit pull request number
    /// skips the picker; the panel flag selects the grouped browser.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.set_github_token {
            OperationMode::SetGitHubToken
        } else if self.set_openai_key {
            OperationMode::SetOpenAiKey
        } else if self.pr.is_some() {
            OperationMode::GenerateFromNumber
        } else if self.panel {
            OperationMode::Panel
        } else {
            OperationMode::Picker
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DeckConfig, OperationMode};
    use crate::error::DeckError;
    use crate::github::PullRequestState;

    #[rstest]
    fn defaults_point_at_public_endpoints() {
        let config = DeckConfig::default();

        assert_eq!(config.github_api_base_url(), "https://api.github.com");
        assert_eq!(config.openai_base_url(), "https://api.openai.com");
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.language(), "Japanese");
        assert_eq!(config.per_page(), 30);
    }

    #[rstest]
    fn configured_base_urls_override_the_defaults() {
        let config = DeckConfig {
            github_api_base_url: Some("https://ghe.example.com/api/v3".to_owned()),
            openai_base_url: Some("https://proxy.example.com".to_owned()),
            ..DeckConfig::default()
        };

        assert_eq!(
            config.github_api_base_url(),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(config.openai_base_url(), "https://proxy.example.com");
    }

    #[rstest]
    #[case(None, PullRequestState::All)]
    #[case(Some("open"), PullRequestState::Open)]
    #[case(Some("closed"), PullRequestState::Closed)]
    #[case(Some("all"), PullRequestState::All)]
    fn listing_state_parses_known_values(
        #[case] state: Option<&str>,
        #[case] expected: PullRequestState,
    ) {
        let config = DeckConfig {
            state: state.map(str::to_owned),
            ..DeckConfig::default()
        };
        assert_eq!(config.listing_state().expect("state should parse"), expected);
    }

    #[rstest]
    fn listing_state_rejects_unknown_values() {
        let config = DeckConfig {
            state: Some("merged".to_owned()),
            ..DeckConfig::default()
        };
        assert!(matches!(
            config.listing_state(),
            Err(DeckError::Configuration { .. })
        ));
    }

    #[rstest]
    fn output_path_defaults_to_numbered_file() {
        let config = DeckConfig::default();
        assert_eq!(config.output_path(42), "pr-42-slides.md");
    }

    #[rstest]
    fn token_storage_flags_win_over_generation() {
        let config = DeckConfig {
            set_github_token: true,
            pr: Some(1),
            panel: true,
            ..DeckConfig::default()
        };
        assert_eq!(config.operation_mode(), OperationMode::SetGitHubToken);
    }

    #[rstest]
    fn explicit_pull_request_number_skips_the_picker() {
        let config = DeckConfig {
            pr: Some(42),
            ..DeckConfig::default()
        };
        assert_eq!(config.operation_mode(), OperationMode::GenerateFromNumber);
    }

    #[rstest]
    fn panel_flag_selects_the_grouped_browser() {
        let config = DeckConfig {
            panel: true,
            ..DeckConfig::default()
        };
        assert_eq!(config.operation_mode(), OperationMode::Panel);
    }

    #[rstest]
    fn no_flags_fall_back_to_the_picker() {
        assert_eq!(DeckConfig::default().operation_mode(), OperationMode::Picker);
    }
}
