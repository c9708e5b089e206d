#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use imagegate_api::auth::google::{GoogleOAuth, GoogleOAuthConfig};
use imagegate_api::auth::session::{issue_session_token, SessionConfig, SessionUser};
use imagegate_api::config::{AppEnv, ServerConfig};
use imagegate_api::router::build_app_router;
use imagegate_api::state::AppState;
use imagegate_generation::openai::OpenAiProvider;
use imagegate_generation::{GenerationProvider, ProviderRegistry};
use imagegate_pipeline::ImageService;
use imagegate_storage::config::SupabaseStorageConfig;
use imagegate_storage::supabase::SupabaseStorage;
use imagegate_storage::StorageProvider;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Tiny PNG signature, base64-encoded.
pub const PNG_B64: &str = "iVBORw0KGgo=";

pub const OPENAI_PATH: &str = "/v1/images/generations";

// ---------------------------------------------------------------------------
// Configuration and app
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        app_env: AppEnv::Test,
        cors_origins: vec!["http://localhost:3000".to_string()],
        public_dir: "tests/fixtures/public".to_string(),
        default_provider: "openai".to_string(),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            max_age_hours: 24,
        },
        google: GoogleOAuthConfig {
            client_id: None,
            client_secret: None,
            callback_url: "http://localhost:3000/auth/google/callback".to_string(),
        },
    }
}

/// Build the full application router around the given image service.
pub fn build_test_app(image_service: ImageService) -> Router {
    build_test_app_with(test_config(), image_service, None)
}

pub fn build_test_app_with(
    config: ServerConfig,
    image_service: ImageService,
    google: Option<GoogleOAuth>,
) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        image_service: Arc::new(image_service),
        google: google.map(Arc::new),
    };
    build_app_router(state, &config)
}

/// App whose image service has no backends; for routes that never generate.
pub fn build_idle_app() -> Router {
    build_test_app(ImageService::new(
        ProviderRegistry::default(),
        "openai",
        supabase_storage(None),
    ))
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

pub fn openai_service(generation: &MockServer, storage: Option<&MockServer>) -> ImageService {
    let provider = OpenAiProvider::new(reqwest::Client::new(), Some("test-api-key".into()))
        .with_api_url(format!("{}{OPENAI_PATH}", generation.uri()));
    let mut registry = ProviderRegistry::default();
    registry.register(GenerationProvider::OpenAi(provider));
    ImageService::new(registry, "openai", supabase_storage(storage))
}

pub fn supabase_storage(server: Option<&MockServer>) -> StorageProvider {
    StorageProvider::Supabase(SupabaseStorage::new(
        reqwest::Client::new(),
        &SupabaseStorageConfig {
            url: server.map(MockServer::uri),
            key: Some("service-key".into()),
            bucket: "images".into(),
        },
    ))
}

pub async fn mount_openai(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_openai_image(server: &MockServer) {
    mount_openai(server, 200, json!({ "data": [{ "b64_json": PNG_B64 }] })).await;
}

/// Bucket probe succeeds; object upload answers with `upload_status`.
pub async fn mount_supabase(server: &MockServer, upload_status: u16) {
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "images" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/[0-9a-f-]{36}\.png$"))
        .respond_with(
            ResponseTemplate::new(upload_status)
                .set_body_json(json!({ "message": "upload result" })),
        )
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn test_user() -> SessionUser {
    SessionUser {
        id: "1234567890".into(),
        email: "ada@example.com".into(),
        name: "Ada Lovelace".into(),
        picture: Some("https://example.com/ada.png".into()),
    }
}

/// `Cookie` header value carrying a valid session for [`test_user`].
pub fn session_cookie() -> String {
    let token = issue_session_token(&test_user(), &test_config().session)
        .expect("session token should sign");
    format!("session={token}")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, None, body.to_string()).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    post_raw(app, uri, Some(cookie), body.to_string()).await
}

/// POST a raw `application/json` body.
pub async fn post_raw(
    app: Router,
    uri: &str,
    cookie: Option<&str>,
    body: String,
) -> Response<Body> {
    let mut request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    send(app, request.body(Body::from(body)).unwrap()).await
}

/// Every `Set-Cookie` header value of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
