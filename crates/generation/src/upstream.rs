//! Response handling shared by the HTTP adapters.

use imagegate_core::provider::ProviderName;
use serde_json::Value;

use crate::error::{ProviderError, DEFAULT_UPSTREAM_STATUS};

/// Picks the most specific error message out of an upstream error body.
pub(crate) type MessageExtractor = fn(&Value) -> Option<&str>;

/// `{ "error": { "message": "..." } }` (OpenAI, Google).
pub(crate) fn error_message(body: &Value) -> Option<&str> {
    body.pointer("/error/message").and_then(Value::as_str)
}

/// Turn a transport failure into a provider error.
///
/// The request URL is dropped from the error first; it can carry credentials.
pub(crate) fn transport_error(provider: ProviderName, err: reqwest::Error) -> ProviderError {
    let err = err.without_url();
    tracing::error!(%provider, error = %err, "Image generation request failed");
    let status = err
        .status()
        .map(|s| s.as_u16())
        .unwrap_or(DEFAULT_UPSTREAM_STATUS);
    ProviderError::upstream(provider, err.to_string(), status)
}

/// Check the status of an upstream response and parse its JSON body.
///
/// Non-2xx responses become [`ProviderError::Upstream`] carrying the upstream
/// status and the most specific message `extract` can find.
pub(crate) async fn read_json(
    provider: ProviderName,
    response: reqwest::Response,
    extract: MessageExtractor,
) -> Result<Value, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        let message = parsed
            .as_ref()
            .and_then(extract)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        tracing::error!(
            %provider,
            status = status.as_u16(),
            error = %message,
            "Image generation rejected upstream"
        );
        return Err(ProviderError::upstream(provider, message, status.as_u16()));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| transport_error(provider, e))
}

/// Pull the base64 image out of a successful response body.
pub(crate) fn require_image(
    provider: ProviderName,
    body: &Value,
    pointer: &str,
) -> Result<String, ProviderError> {
    match body.pointer(pointer).and_then(Value::as_str) {
        Some(image) if !image.is_empty() => Ok(image.to_owned()),
        _ => {
            tracing::error!(%provider, field = pointer, "Response did not contain an image");
            Err(ProviderError::upstream(
                provider,
                format!("{} did not return a base64 image", provider.label()),
                DEFAULT_UPSTREAM_STATUS,
            ))
        }
    }
}
