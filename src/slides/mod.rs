//! Slide deck generation: prompt assembly plus the chat model call.

mod openai;
mod prompt;

pub use openai::{OpenAiConfig, OpenAiSlideGenerator, SlideGenerator};
pub use prompt::build_prompt;

#[cfg(test)]
pub use openai::MockSlideGenerator;

use crate::error::DeckError;
use crate::github::gateway::DetailGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::PullRequest;

/// Stages of the generate flow, reported as each one starts so callers can
/// show progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStage {
    /// Pull request metadata, commits, comments, and diff are being fetched.
    FetchingDetails,
    /// The repository README is being fetched.
    FetchingReadme,
    /// The prompt is assembled and the model is being called.
    GeneratingSlides,
}

/// Fetches pull request details and the README, assembles the prompt, and
/// asks the model for a Marp deck.
///
/// `report` is called as each stage starts.
///
/// # Errors
///
/// Propagates gateway and chat errors unchanged; any sub-fetch failing
/// aborts the whole flow with no partial output.
pub async fn generate_deck(
    detail_gateway: &dyn DetailGateway,
    generator: &dyn SlideGenerator,
    locator: &RepositoryLocator,
    pr: &PullRequest,
    language: &str,
    report: &mut dyn FnMut(DeckStage),
) -> Result<String, DeckError> {
    report(DeckStage::FetchingDetails);
    let detail = detail_gateway.pull_request_detail(locator, pr.number).await?;

    report(DeckStage::FetchingReadme);
    let readme = detail_gateway.readme(locator).await?;

    let prompt = build_prompt(pr, &detail, &readme, language)?;
    tracing::debug!(
        number = pr.number,
        prompt_chars = prompt.len(),
        "assembled slide prompt"
    );

    report(DeckStage::GeneratingSlides);
    generator.generate(&prompt).await
}
