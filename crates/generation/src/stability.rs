//! Stability AI adapter (Stable Image Core, multipart upload).

use imagegate_core::generation::GenerationRequest;
use imagegate_core::image::IMAGE_EXTENSION;
use imagegate_core::provider::ProviderName;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use serde_json::Value;

use crate::error::ProviderError;
use crate::upstream;

pub const DEFAULT_API_URL: &str = "https://api.stability.ai/v2beta/stable-image/generate/core";

const NAME: ProviderName = ProviderName::Stability;

/// Client for the Stable Image Core endpoint.
///
/// Asking for `application/json` makes the endpoint answer with
/// `{ "image": "<base64>" }` instead of raw bytes.
#[derive(Debug, Clone)]
pub struct StabilityProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl StabilityProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("Stability API Key is missing. Provider will fail if used.");
        }
        Self {
            client,
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
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

        let form = Form::new()
            .text("prompt", request.prompt().to_owned())
            .text("output_format", IMAGE_EXTENSION);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| upstream::transport_error(NAME, e))?;

        let body = upstream::read_json(NAME, response, first_error_message).await?;
        upstream::require_image(NAME, &body, "/image")
    }
}

/// `{ "errors": [{ "message": "..." }] }`
fn first_error_message(body: &Value) -> Option<&str> {
    body.pointer("/errors/0/message").and_then(Value::as_str)
}
