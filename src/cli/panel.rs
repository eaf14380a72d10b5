//! Grouped browsing of pull requests before generation.

use bubbletea_rs::Program;

use prdeck::ui::{PanelApp, set_ui_context};
use prdeck::{DeckConfig, DeckError};

use super::generate::{generate_for, resolve_credentials, resolve_locator};

/// Runs the side-panel browser and generates a deck for the chosen pull
/// request.
///
/// # Errors
///
/// Returns an error when the repository cannot be determined, credentials
/// are declined, the panel fails to start, or any fetch or generation step
/// fails.
pub async fn run(config: &DeckConfig) -> Result<(), DeckError> {
    let locator = resolve_locator(config)?;
    let credentials = resolve_credentials(config)?;

    let _ = set_ui_context(
        locator.clone(),
        credentials.github.clone(),
        config.listing_state()?,
        config.per_page(),
    );

    let program = Program::<PanelApp>::builder()
        .alt_screen(true)
        .build()
        .map_err(|error| DeckError::Interface {
            message: error.to_string(),
        })?;
    let final_model = program.run().await.map_err(|error| DeckError::Interface {
        message: error.to_string(),
    })?;

    let Some(chosen) = final_model.selection().cloned() else {
        return Ok(());
    };

    generate_for(config, &locator, &credentials, &chosen).await
}
