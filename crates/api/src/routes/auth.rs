//! Route definitions for the `/auth` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET /google            -> google_login
/// GET /google/callback   -> google_callback
/// GET /logout            -> logout
/// GET /user              -> current_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/google", get(auth::google_login))
        .route("/google/callback", get(auth::google_callback))
        .route("/logout", get(auth::logout))
        .route("/user", get(auth::current_user))
}
