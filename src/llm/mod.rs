pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{GroundedReply, GroundingChunk};

/// Grounded-generation abstraction - different model backends can be plugged in
#[async_trait::async_trait]
pub trait GroundedModel: Send + Sync {
    /// Issue exactly one search-grounded generation request for the prompt.
    async fn generate(&self, prompt: &str) -> Result<GroundedReply, ModelError>;
}

/// Model-backend errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to the config file.")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
