use imagegate_core::generation::GenerationRequest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-api-key";

/// Tiny PNG signature, base64-encoded.
pub const PNG_B64: &str = "iVBORw0KGgo=";

pub fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest::new(prompt, None).expect("test prompt should be valid")
}

/// Mount a POST mock on `route` answering with `status` and a JSON body.
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
