//! Google OAuth 2.0 authorization-code flow.
//!
//! 1. [`GoogleOAuth::authorization_url`] sends the browser to Google's consent
//!    screen with a random `state`.
//! 2. Google redirects back with `code` and `state`.
//! 3. [`GoogleOAuth::authenticate`] exchanges the code for an access token and
//!    reads the user's profile from the userinfo endpoint.

use reqwest::Url;
use serde::Deserialize;

use crate::auth::session::SessionUser;

pub const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const SCOPES: &str = "profile email";
const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/auth/google/callback";

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Authorization denied: {0}")]
    Denied(String),

    #[error("Missing authorization code")]
    MissingCode,

    #[error("OAuth state mismatch")]
    StateMismatch,

    #[error("Invalid OAuth endpoint: {0}")]
    Endpoint(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Profile request failed: {0}")]
    Profile(String),

    #[error("OAuth request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub callback_url: String,
}

impl GoogleOAuthConfig {
    /// Load Google OAuth settings from environment variables.
    ///
    /// | Env Var                | Default                                      |
    /// |------------------------|----------------------------------------------|
    /// | `GOOGLE_CLIENT_ID`     | --                                           |
    /// | `GOOGLE_CLIENT_SECRET` | --                                           |
    /// | `GOOGLE_CALLBACK_URL`  | `http://localhost:3000/auth/google/callback` |
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            client_id: var("GOOGLE_CLIENT_ID"),
            client_secret: var("GOOGLE_CLIENT_SECRET"),
            callback_url: var("GOOGLE_CALLBACK_URL")
                .unwrap_or_else(|| DEFAULT_CALLBACK_URL.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Subset of the OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl From<UserInfo> for SessionUser {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.sub,
            email: info.email.unwrap_or_default(),
            name: info.name.unwrap_or_default(),
            picture: info.picture,
        }
    }
}

/// Client for one registered Google OAuth application.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    authorization_url: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleOAuth {
    /// Build the client, or `None` (with a warning) when the client id or
    /// secret is missing.
    pub fn from_config(client: reqwest::Client, config: &GoogleOAuthConfig) -> Option<Self> {
        let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret)
        else {
            tracing::warn!("Google OAuth credentials missing. Sign-in is disabled.");
            return None;
        };

        Some(Self {
            client,
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
            callback_url: config.callback_url.clone(),
            authorization_url: AUTHORIZATION_ENDPOINT.to_string(),
            token_url: TOKEN_ENDPOINT.to_string(),
            userinfo_url: USERINFO_ENDPOINT.to_string(),
        })
    }

    /// Point the token and userinfo calls at different endpoints.
    pub fn with_endpoints(
        mut self,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        self.token_url = token_url.into();
        self.userinfo_url = userinfo_url.into();
        self
    }

    /// Consent-screen URL carrying `state`.
    pub fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            &self.authorization_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| OAuthError::Endpoint(e.to_string()))?;
        Ok(url.into())
    }

    /// Exchange an authorization code for the signed-in user's profile.
    pub async fn authenticate(&self, code: &str) -> Result<SessionUser, OAuthError> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_profile(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                })
                .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));
            return Err(OAuthError::TokenExchange(message));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<SessionUser, OAuthError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::Profile(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let info: UserInfo = response.json().await?;
        Ok(info.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth() -> GoogleOAuth {
        GoogleOAuth::from_config(
            reqwest::Client::new(),
            &GoogleOAuthConfig {
                client_id: Some("client-123".into()),
                client_secret: Some("shh".into()),
                callback_url: DEFAULT_CALLBACK_URL.into(),
            },
        )
        .expect("configured")
    }

    #[test]
    fn missing_credentials_disable_the_client() {
        let config = GoogleOAuthConfig {
            client_id: Some("client-123".into()),
            client_secret: None,
            callback_url: DEFAULT_CALLBACK_URL.into(),
        };
        assert!(GoogleOAuth::from_config(reqwest::Client::new(), &config).is_none());
    }

    #[test]
    fn authorization_url_carries_client_and_state() {
        let url = Url::parse(&oauth().authorization_url("state-1").unwrap()).unwrap();
        assert_eq!(url.host_str(), Some("accounts.google.com"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("client_id"), Some("client-123"));
        assert_eq!(get("redirect_uri"), Some(DEFAULT_CALLBACK_URL));
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("scope"), Some("profile email"));
        assert_eq!(get("state"), Some("state-1"));
    }

    #[test]
    fn userinfo_maps_to_session_user() {
        let info: UserInfo = serde_json::from_value(serde_json::json!({
            "sub": "42",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "email_verified": true
        }))
        .unwrap();

        assert_eq!(
            SessionUser::from(info),
            SessionUser {
                id: "42".into(),
                email: "ada@example.com".into(),
                name: "Ada Lovelace".into(),
                picture: None,
            }
        );
    }
}
