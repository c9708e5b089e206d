pub mod auth;
pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /generate-image            generate one image (POST, requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/generate-image", post(handlers::image::generate_image))
}
