//! Slide deck generation flows: interactive picker and explicit number.

use std::io::{self, Write};
use std::path::Path;

use bubbletea_rs::Program;
use camino::Utf8PathBuf;

use prdeck::secrets::{GITHUB_TOKEN_KEY, OPENAI_KEY_KEY, SecretStore};
use prdeck::ui::{PickerApp, set_ui_context};
use prdeck::{
    ApiToken, DeckConfig, DeckError, DeckStage, OctocrabDetailGateway, OpenAiConfig,
    OpenAiSlideGenerator, PullRequest, RepositoryLocator, generate_deck,
};

use super::tokens::resolve_secret;

/// Credentials resolved once per invocation.
pub(crate) struct Credentials {
    pub(crate) github: ApiToken,
    pub(crate) openai: ApiToken,
}

/// Runs the interactive picker and generates a deck for the chosen pull
/// request.
///
/// # Errors
///
/// Returns an error when the repository cannot be determined, credentials
/// are declined, the picker fails to start, or any fetch or generation
/// step fails.
pub async fn run_picker(config: &DeckConfig) -> Result<(), DeckError> {
    let locator = resolve_locator(config)?;
    let credentials = resolve_credentials(config)?;

    let _ = set_ui_context(
        locator.clone(),
        credentials.github.clone(),
        config.listing_state()?,
        config.per_page(),
    );

    let program = Program::<PickerApp>::builder()
        .alt_screen(true)
        .build()
        .map_err(interface_error)?;
    let final_model = program.run().await.map_err(interface_error)?;

    let Some(chosen) = final_model.selection().cloned() else {
        // Dismissed without picking anything.
        return Ok(());
    };

    generate_for(config, &locator, &credentials, &chosen).await
}

/// Generates a deck for an explicitly numbered pull request, bypassing the
/// picker.
///
/// # Errors
///
/// Returns an error when the repository cannot be determined, credentials
/// are declined, or any fetch or generation step fails.
pub async fn run_for_number(config: &DeckConfig, number: u64) -> Result<(), DeckError> {
    let locator = resolve_locator(config)?;
    let credentials = resolve_credentials(config)?;

    let pr = fetch_pull_request(&locator, &credentials.github, number).await?;
    generate_for(config, &locator, &credentials, &pr).await
}

/// Resolves the repository to operate on: explicit configuration first,
/// local git discovery otherwise.
pub(crate) fn resolve_locator(config: &DeckConfig) -> Result<RepositoryLocator, DeckError> {
    resolve_locator_at(config, Path::new("."))
}

fn resolve_locator_at(config: &DeckConfig, start: &Path) -> Result<RepositoryLocator, DeckError> {
    let api_base = config.github_api_base_url();

    if let (Some(owner), Some(repo)) = (config.owner.as_deref(), config.repo.as_deref()) {
        return RepositoryLocator::new(owner, repo, api_base);
    }

    match prdeck::local::discover_repository(start) {
        Ok(remote) => RepositoryLocator::new(&remote.owner, &remote.name, api_base),
        Err(error) => {
            tracing::debug!(%error, "repository discovery failed");
            Err(DeckError::MissingRepository)
        }
    }
}

/// Resolves both credentials, prompting for whichever is missing.
pub(crate) fn resolve_credentials(_config: &DeckConfig) -> Result<Credentials, DeckError> {
    let store = SecretStore::open_default()?;
    let github = resolve_secret(
        &store,
        GITHUB_TOKEN_KEY,
        "Enter your GitHub Personal Access Token",
        DeckError::MissingGitHubToken,
    )?;
    let openai = resolve_secret(
        &store,
        OPENAI_KEY_KEY,
        "Enter your OpenAI API Key",
        DeckError::MissingOpenAiKey,
    )?;
    Ok(Credentials { github, openai })
}

/// Fetches the listing entry for one pull request number.
async fn fetch_pull_request(
    locator: &RepositoryLocator,
    token: &ApiToken,
    number: u64,
) -> Result<PullRequest, DeckError> {
    use prdeck::ListingGateway;

    let gateway = prdeck::OctocrabListingGateway::for_token(token, locator)?;
    gateway.get_pull_request(locator, number).await
}

/// Fetches details, generates the deck, and writes it to the output path.
pub(crate) async fn generate_for(
    config: &DeckConfig,
    locator: &RepositoryLocator,
    credentials: &Credentials,
    pr: &PullRequest,
) -> Result<(), DeckError> {
    {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "Generating slides for {}...", pr.label()).map_err(write_error)?;
    }

    let detail_gateway = OctocrabDetailGateway::for_token(&credentials.github, locator)?;
    let generator = OpenAiSlideGenerator::new(OpenAiConfig::new(
        config.openai_base_url(),
        config.model(),
        credentials.openai.clone(),
    ))?;

    let deck = generate_deck(
        &detail_gateway,
        &generator,
        locator,
        pr,
        config.language(),
        &mut |stage| {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{}", stage_line(stage));
        },
    )
    .await?;

    let output = Utf8PathBuf::from(config.output_path(pr.number));
    prdeck::files::write_text(&output, &deck, "deck")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").map_err(write_error)
}

const fn stage_line(stage: DeckStage) -> &'static str {
    match stage {
        DeckStage::FetchingDetails => "Fetching pull request details...",
        DeckStage::FetchingReadme => "Fetching repository README...",
        DeckStage::GeneratingSlides => "Generating slides...",
    }
}

fn interface_error(error: impl std::fmt::Display) -> DeckError {
    DeckError::Interface {
        message: error.to_string(),
    }
}

fn write_error(error: io::Error) -> DeckError {
    DeckError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use prdeck::{DeckConfig, DeckError};

    use super::resolve_locator_at;

    #[test]
    fn explicit_owner_and_repo_skip_discovery() {
        let config = DeckConfig {
            owner: Some("acme".to_owned()),
            repo: Some("widgets".to_owned()),
            ..DeckConfig::default()
        };

        let locator = resolve_locator_at(&config, Path::new("/nonexistent"))
            .expect("explicit configuration should not touch git");
        assert_eq!(locator.slug(), "acme/widgets");
    }

    #[test]
    fn discovery_failure_reports_a_missing_repository() {
        let temp_dir = TempDir::new().expect("should create temp dir");

        let error = resolve_locator_at(&DeckConfig::default(), temp_dir.path())
            .expect_err("discovery outside a repository should fail");
        assert_eq!(error, DeckError::MissingRepository);
    }
}
