//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests (`tests/common/mod.rs`) use the exact same middleware
//! stack.

use std::any::Any;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode, Uri};
use axum::response::Response;
use axum::{middleware, Router};
use imagegate_core::error::CoreError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::{error_body, AppError, ErrorDetail, GENERIC_ERROR_MESSAGE};
use crate::middleware::error_detail::expose_error_detail;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body (JSON prompts plus base64 reference images).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application [`Router`] with all middleware layers.
///
/// Requests that match no route are served from `config.public_dir`; paths
/// with no file there get the 404 error envelope.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Error detail in envelopes (not in production)
/// 6. Panic recovery (catch panics, return the 500 envelope)
/// 7. Body size limit
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    let static_files = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(route_not_found.into_service());

    let router = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        .nest("/auth", routes::auth::router())
        .nest("/api/v1", routes::api_routes())
        .fallback_service(static_files)
        // -- Middleware stack (applied bottom-up) --
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic));

    let router = if config.app_env.is_production() {
        router
    } else {
        router.layer(middleware::from_fn(expose_error_detail))
    };

    router
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::Core(CoreError::NotFound(format!("Route {uri} not found")))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    let mut response = error_body(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE);
    response.extensions_mut().insert(ErrorDetail(detail));
    response
}
