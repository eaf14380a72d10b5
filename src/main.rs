//! Prdeck CLI entrypoint: pull request to Marp slide deck.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prdeck::config::OperationMode;
use prdeck::{DeckConfig, DeckError};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DeckError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::SetGitHubToken => cli::tokens::set_github_token(),
        OperationMode::SetOpenAiKey => cli::tokens::set_openai_key(),
        OperationMode::GenerateFromNumber => {
            let number = config.pr.ok_or_else(|| DeckError::Configuration {
                message: "pull request number is required (use --pr)".to_owned(),
            })?;
            cli::generate::run_for_number(&config, number).await
        }
        OperationMode::Panel => cli::panel::run(&config).await,
        OperationMode::Picker => cli::generate::run_picker(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DeckError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DeckConfig, DeckError> {
    DeckConfig::load().map_err(|error| DeckError::Configuration {
        message: error.to_string(),
    })
}
