use std::fmt;

use crate::auth::google::GoogleOAuthConfig;
use crate::auth::session::SessionConfig;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    /// Parse an `APP_ENV` value.
    ///
    /// # Panics
    ///
    /// Panics on anything other than `development`, `production` or `test`.
    pub fn parse(value: &str) -> Self {
        match value {
            "development" => Self::Development,
            "production" => Self::Production,
            "test" => Self::Test,
            other => panic!("APP_ENV must be one of development, production, test (got '{other}')"),
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Missing backend
/// credentials are never a startup error.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub app_env: AppEnv,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Directory served as static files for unmatched routes.
    pub public_dir: String,
    /// Name of the generation backend used for every request.
    pub default_provider: String,
    pub session: SessionConfig,
    pub google: GoogleOAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `HOST`             | `0.0.0.0`               |
    /// | `PORT`             | `3000`                  |
    /// | `APP_ENV`          | `development`           |
    /// | `CORS_ORIGINS`     | `http://localhost:3000` |
    /// | `PUBLIC_DIR`       | `public`                |
    /// | `DEFAULT_PROVIDER` | `openai`                |
    ///
    /// Session and Google OAuth settings are read by [`SessionConfig::from_env`]
    /// and [`GoogleOAuthConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let app_env = AppEnv::parse(
            &std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into());

        let default_provider =
            std::env::var("DEFAULT_PROVIDER").unwrap_or_else(|_| "openai".into());

        Self {
            host,
            port,
            app_env,
            cors_origins,
            public_dir,
            default_provider,
            session: SessionConfig::from_env(),
            google: GoogleOAuthConfig::from_env(),
        }
    }
}
