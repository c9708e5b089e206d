//! Google Imagen adapter (Generative Language API `:predict`).

use imagegate_core::generation::GenerationRequest;
use imagegate_core::provider::ProviderName;
use serde_json::json;

use crate::error::ProviderError;
use crate::upstream;

/// Root of the Generative Language API.
pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const MODEL: &str = "imagen-4.0-generate-preview-06-06";

const NAME: ProviderName = ProviderName::Gemini;

/// Client for the Imagen `predict` endpoint. The API key travels as the
/// `key` query parameter.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl GeminiProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("Gemini API Key is missing. Provider will fail if used.");
        }
        Self {
            client,
            api_key,
            api_url: format!("{API_BASE}/models/{MODEL}:predict"),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: NAME })?;

        let body = json!({
            "instances": [{ "prompt": request.prompt() }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
            },
        });

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream::transport_error(NAME, e))?;

        let body = upstream::read_json(NAME, response, upstream::error_message).await?;
        upstream::require_image(NAME, &body, "/predictions/0/bytesBase64Encoded")
    }
}
