use std::sync::Arc;

use imagegate_pipeline::ImageService;

use crate::auth::google::GoogleOAuth;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Generation + persistence, built once at startup.
    pub image_service: Arc<ImageService>,
    /// Google sign-in; `None` when the OAuth client is not configured.
    pub google: Option<Arc<GoogleOAuth>>,
}
