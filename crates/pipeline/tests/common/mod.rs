use imagegate_core::generation::GenerationRequest;
use imagegate_generation::openai::OpenAiProvider;
use imagegate_generation::{GenerationProvider, ProviderRegistry};
use imagegate_pipeline::ImageService;
use imagegate_storage::config::SupabaseStorageConfig;
use imagegate_storage::supabase::SupabaseStorage;
use imagegate_storage::StorageProvider;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Tiny PNG signature, base64-encoded.
pub const PNG_B64: &str = "iVBORw0KGgo=";

pub const OPENAI_PATH: &str = "/v1/images/generations";

pub fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest::new(prompt, None).expect("test prompt should be valid")
}

/// Registry holding only an OpenAI adapter pointed at `server`.
pub fn openai_registry(server: &MockServer) -> ProviderRegistry {
    let provider = OpenAiProvider::new(reqwest::Client::new(), Some("test-api-key".into()))
        .with_api_url(format!("{}{OPENAI_PATH}", server.uri()));
    let mut registry = ProviderRegistry::default();
    registry.register(GenerationProvider::OpenAi(provider));
    registry
}

/// Supabase storage pointed at `server` (or at nothing when `None`).
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

pub fn service(generation: &MockServer, storage: Option<&MockServer>) -> ImageService {
    ImageService::new(openai_registry(generation), "openai", supabase_storage(storage))
}

pub async fn mount_openai_image(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "b64_json": PNG_B64 }] })),
        )
        .mount(server)
        .await;
}

/// Bucket probe and object upload both succeed.
pub async fn mount_supabase_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "images" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/[0-9a-f-]{36}\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "images/x.png" })))
        .mount(server)
        .await;
}
