//! Session-cookie authentication extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use imagegate_core::error::CoreError;

use crate::auth::cookies::{read_cookie, SESSION_COOKIE};
use crate::auth::session::{validate_session_token, SessionUser};
use crate::error::AppError;
use crate::state::AppState;

pub const AUTH_REQUIRED: &str = "Authentication required";

/// Signed-in user extracted from the `session` cookie.
///
/// Use this as an extractor parameter in any handler that requires a
/// signed-in user; use `Option<AuthUser>` where signing in is optional.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl AuthUser {
    fn from_parts(parts: &Parts, state: &AppState) -> Option<Self> {
        let token = read_cookie(&parts.headers, SESSION_COOKIE)?;
        validate_session_token(token, &state.config.session)
            .map(AuthUser)
            .inspect_err(|e| tracing::debug!(error = %e, "Rejected session cookie"))
            .ok()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts, state)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(AUTH_REQUIRED.into())))
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(Self::from_parts(parts, state))
    }
}
