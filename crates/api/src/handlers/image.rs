//! Handler for `POST /api/v1/generate-image`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use imagegate_core::error::CoreError;
use imagegate_core::generation::{GenerationRequest, GenerationResult};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /generate-image`.
///
/// A missing `prompt` reads as empty and fails validation as "required".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub reference_images: Option<Vec<String>>,
}

/// POST /api/v1/generate-image
///
/// Generate one image with the configured backend. Returns the stored image's
/// URL, or the image inline when it could not be stored.
pub async fn generate_image(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<GenerateImageBody>, JsonRejection>,
) -> AppResult<Json<GenerationResult>> {
    let Json(body) = body.map_err(|rejection| CoreError::Validation(rejection.body_text()))?;

    let request = GenerationRequest::new(body.prompt, body.reference_images)?;
    tracing::debug!(
        user = %user.email,
        prompt = %request.prompt_preview(),
        "Image generation requested"
    );

    let result = state.image_service.generate_image(&request).await?;
    Ok(Json(result))
}
