//! Handlers for the `/auth` resource (Google sign-in, logout, current user).

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::cookies::{
    build_cookie, clear_cookie, read_cookie, SESSION_COOKIE, STATE_COOKIE, STATE_MAX_AGE_SECS,
};
use crate::auth::google::{GoogleOAuth, OAuthError};
use crate::auth::session::{issue_session_token, SessionUser};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Where the browser lands after sign-in, sign-out or a failed sign-in.
const HOME: &str = "/";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string Google appends to the callback URL.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /auth/google
///
/// Redirect to Google's consent screen, remembering the OAuth `state` in a
/// short-lived cookie.
pub async fn google_login(State(state): State<AppState>) -> Response {
    let Some(google) = state.google.as_deref() else {
        tracing::warn!("Google sign-in requested but OAuth is not configured");
        return Redirect::to(HOME).into_response();
    };

    let oauth_state = Uuid::new_v4().to_string();
    match google.authorization_url(&oauth_state) {
        Ok(url) => {
            let secure = state.config.app_env.is_production();
            let cookie = build_cookie(STATE_COOKIE, &oauth_state, STATE_MAX_AGE_SECS, secure);
            (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(&url)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Google authorization URL");
            Redirect::to(HOME).into_response()
        }
    }
}

/// GET /auth/google/callback
///
/// Complete sign-in and set the session cookie. Every failure redirects home
/// without a session.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Response {
    let secure = state.config.app_env.is_production();
    let clear_state = clear_cookie(STATE_COOKIE, secure);

    let Some(google) = state.google.as_deref() else {
        tracing::warn!("Google callback received but OAuth is not configured");
        return (AppendHeaders([(SET_COOKIE, clear_state)]), Redirect::to(HOME)).into_response();
    };

    let expected_state = read_cookie(&headers, STATE_COOKIE);
    let signed_in = match complete_sign_in(google, params, expected_state).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            return (AppendHeaders([(SET_COOKIE, clear_state)]), Redirect::to(HOME))
                .into_response();
        }
    };

    match issue_session_token(&signed_in, &state.config.session) {
        Ok(token) => {
            tracing::info!(user = %signed_in.email, "User signed in");
            let session = build_cookie(
                SESSION_COOKIE,
                &token,
                state.config.session.max_age_secs(),
                secure,
            );
            (
                AppendHeaders([(SET_COOKIE, clear_state), (SET_COOKIE, session)]),
                Redirect::to(HOME),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to sign session token");
            (AppendHeaders([(SET_COOKIE, clear_state)]), Redirect::to(HOME)).into_response()
        }
    }
}

async fn complete_sign_in(
    google: &GoogleOAuth,
    params: CallbackParams,
    expected_state: Option<&str>,
) -> Result<SessionUser, OAuthError> {
    if let Some(error) = params.error {
        return Err(OAuthError::Denied(error));
    }
    match (params.state.as_deref(), expected_state) {
        (Some(received), Some(expected)) if received == expected => {}
        _ => return Err(OAuthError::StateMismatch),
    }
    let code = params.code.ok_or(OAuthError::MissingCode)?;
    google.authenticate(&code).await
}

/// GET /auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    let secure = state.config.app_env.is_production();
    (
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE, secure))]),
        Redirect::to(HOME),
    )
        .into_response()
}

/// GET /auth/user
///
/// The signed-in user, or `{ "user": null }`.
pub async fn current_user(user: Option<AuthUser>) -> Json<Value> {
    Json(json!({ "user": user.map(|AuthUser(user)| user) }))
}
