//! Development aid: expose the error behind an error envelope.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use crate::error::ErrorDetail;

/// Envelopes larger than this are passed through untouched.
const MAX_ENVELOPE_BYTES: usize = 64 * 1024;

/// Copy the [`ErrorDetail`] extension of an error response into its body as
/// `error.stack`. Responses without the extension pass through unchanged.
pub async fn expose_error_detail(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ENVELOPE_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Could not buffer error response");
            parts.headers.remove(CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut envelope: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    if let Some(error) = envelope.get_mut("error").and_then(Value::as_object_mut) {
        error.insert("stack".into(), Value::String(detail));
    }

    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(envelope.to_string()))
}
