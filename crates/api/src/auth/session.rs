//! Signed session tokens.
//!
//! A session is an HS256-signed JWT whose claims carry the signed-in
//! [`SessionUser`]. It lives in an HttpOnly cookie; nothing is stored
//! server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default session lifetime in hours.
const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// Length of the per-process secret generated when `SESSION_SECRET` is unset.
const GENERATED_SECRET_LEN: usize = 64;

/// Profile of the signed-in Google user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub user: SessionUser,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 24).
    pub max_age_hours: i64,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default            |
    /// |-------------------------|----------|--------------------|
    /// | `SESSION_SECRET`        | no       | random per process |
    /// | `SESSION_MAX_AGE_HOURS` | no       | `24`               |
    ///
    /// Without `SESSION_SECRET` every restart invalidates existing sessions.
    pub fn from_env() -> Self {
        let secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("SESSION_SECRET is not set; sessions will not survive a restart");
                generate_secret()
            }
        };

        let max_age_hours: i64 = std::env::var("SESSION_MAX_AGE_HOURS")
            .unwrap_or_else(|_| DEFAULT_MAX_AGE_HOURS.to_string())
            .parse()
            .expect("SESSION_MAX_AGE_HOURS must be a valid i64");

        Self {
            secret,
            max_age_hours,
        }
    }

    pub fn max_age_secs(&self) -> i64 {
        self.max_age_hours * 60 * 60
    }
}

fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Sign a session token for `user`.
pub fn issue_session_token(
    user: &SessionUser,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        user: user.clone(),
        exp: now + config.max_age_secs(),
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a session token and return the user it was issued for.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionUser, jsonwebtoken::errors::Error> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.user)
}
