//! OpenAI Images API adapter (`dall-e-3`).

use imagegate_core::generation::GenerationRequest;
use imagegate_core::provider::ProviderName;
use serde_json::json;

use crate::error::ProviderError;
use crate::upstream;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/images/generations";

const MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";
const NAME: ProviderName = ProviderName::OpenAi;

/// Client for the OpenAI image generation endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("OpenAI API Key is missing. Provider will fail if used.");
        }
        Self {
            client,
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point the adapter at a different endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Generate one square image and return it base64-encoded.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: NAME })?;

        let body = json!({
            "model": MODEL,
            "prompt": request.prompt(),
            "n": 1,
            "size": IMAGE_SIZE,
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream::transport_error(NAME, e))?;

        let body = upstream::read_json(NAME, response, upstream::error_message).await?;
        upstream::require_image(NAME, &body, "/data/0/b64_json")
    }
}
