use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imagegate_core::error::CoreError;
use imagegate_pipeline::ImageServiceError;
use serde_json::json;

/// Message returned for failures whose details must not reach the caller.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the JSON error envelope
/// `{ "success": false, "error": { "message": ... } }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `imagegate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Provider selection or generation failed.
    #[error(transparent)]
    Image(#[from] ImageServiceError),

    /// An internal error; the message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Debug rendering of the error behind an error response.
///
/// Attached as a response extension. Only the error-detail middleware, which
/// is not installed in production, copies it into the body.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Image(err) => {
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    fn public_message(&self) -> String {
        match self {
            AppError::InternalError(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.public_message();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Unexpected Error: {message}");
        } else {
            tracing::warn!("Operational Error: {message}");
        }

        let mut response = error_body(status, &message);
        response
            .extensions_mut()
            .insert(ErrorDetail(format!("{self:?}")));
        response
    }
}

/// The error envelope with the given status.
pub fn error_body(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "success": false,
        "error": { "message": message },
    });
    (status, axum::Json(body)).into_response()
}
