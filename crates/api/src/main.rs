use std::net::SocketAddr;
use std::sync::Arc;

use imagegate_api::auth::google::GoogleOAuth;
use imagegate_api::config::ServerConfig;
use imagegate_api::router::build_app_router;
use imagegate_api::state::AppState;
use imagegate_generation::{GenerationConfig, ProviderRegistry};
use imagegate_pipeline::ImageService;
use imagegate_storage::{StorageConfig, StorageProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let production = std::env::var("APP_ENV").is_ok_and(|v| v == "production");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "imagegate_api=debug,tower_http=debug".into());
    if production {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        env = %config.app_env,
        "Loaded server configuration"
    );

    // --- Backends ---
    let http = reqwest::Client::new();

    let registry = ProviderRegistry::from_config(&http, &GenerationConfig::from_env());
    tracing::info!(
        providers = registry.len(),
        default = %config.default_provider,
        "Generation providers registered"
    );

    let storage = StorageProvider::from_config(&http, &StorageConfig::from_env()).await;

    let image_service = ImageService::new(registry, config.default_provider.clone(), storage);
    let google = GoogleOAuth::from_config(http, &config.google).map(Arc::new);

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        image_service: Arc::new(image_service),
        google,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
