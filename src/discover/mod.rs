pub mod filters;
pub mod parse;
pub mod sources;
pub mod types;

pub use filters::{OutputFormat, SearchFilters};
pub use types::{Opportunity, OpportunityKind, SearchResult, Source};

use crate::llm::{GroundedModel, ModelError};
use crate::prompt::build_prompt;

/// Discovery-pipeline errors, surfaced to the UI with their display message
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// Missing or invalid credential. Recoverable by fixing the
    /// configuration, not by retrying.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport or service failure, surfaced verbatim. Recoverable by a
    /// user-initiated retry.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The reply could not be read as opportunity data even after the one
    /// fence-strip retry.
    #[error("The service reply was not in the expected format: {0}")]
    MalformedResponse(String),
}

impl From<ModelError> for DiscoverError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MissingApiKey | ModelError::InvalidApiKey => {
                DiscoverError::Configuration(err.to_string())
            }
            ModelError::RateLimitExceeded
            | ModelError::ApiError(_)
            | ModelError::NetworkError(_) => DiscoverError::Provider(err.to_string()),
        }
    }
}

/// Orchestrates one discovery round trip: prompt → grounded generation →
/// parse + source extraction.
///
/// All-or-nothing: when parsing fails, the extracted sources are discarded
/// and only the error propagates. An empty opportunity list is a
/// legitimate success.
pub struct Discovery<M: GroundedModel> {
    model: M,
}

impl<M: GroundedModel> Discovery<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub async fn discover(&self, filters: &SearchFilters) -> Result<SearchResult, DiscoverError> {
        let prompt = build_prompt(filters);

        tracing::info!(
            sectors = filters.sectors.len(),
            regions = filters.geography.len(),
            deadline = %filters.deadline,
            organization = %filters.specific_organization,
            "starting discovery"
        );

        let reply = self.model.generate(&prompt).await?;

        let opportunities = parse::parse_opportunities(&reply.text)?;
        let sources = sources::extract_sources(&reply.grounding);

        tracing::info!(
            opportunity_count = opportunities.len(),
            source_count = sources.len(),
            "discovery completed"
        );

        Ok(SearchResult {
            opportunities,
            sources,
        })
    }
}
