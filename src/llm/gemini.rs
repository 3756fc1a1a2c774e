use crate::config::Config;
use crate::llm::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GroundedReply,
    Part, Tool,
};
use crate::llm::{GroundedModel, ModelError};
use std::time::Duration;

/// Gemini generateContent client with Google Search grounding enabled.
///
/// One request per `generate` call; retry policy belongs to the caller's
/// transport layer, not here.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: Config,
}

impl GeminiClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl GroundedModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GroundedReply, ModelError> {
        // Credential check happens before any network IO.
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or(ModelError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base(),
            self.config.model
        );

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "gemini generate request"
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            tools: Some(vec![Tool::google_search()]),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                temperature: None,
            }),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "gemini api returned error"
            );

            return match status.as_u16() {
                401 | 403 => Err(ModelError::InvalidApiKey),
                429 => Err(ModelError::RateLimitExceeded),
                _ => Err(ModelError::ApiError(format!(
                    "HTTP {}: {}",
                    status, error_text
                ))),
            };
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::ApiError(format!("Malformed service response: {e}")))?;

        if parsed.candidates.is_empty() {
            return Err(ModelError::ApiError(
                "Service returned no candidates".to_string(),
            ));
        }

        let reply = GroundedReply {
            text: parsed.text(),
            grounding: parsed.grounding_chunks(),
        };

        tracing::debug!(
            text_len = reply.text.len(),
            grounding_count = reply.grounding.len(),
            "gemini generate completed"
        );

        Ok(reply)
    }
}
