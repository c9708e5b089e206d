//! Supabase Storage backend against a mock Storage API.

use assert_matches::assert_matches;
use imagegate_storage::config::SupabaseStorageConfig;
use imagegate_storage::supabase::SupabaseStorage;
use imagegate_storage::StorageError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_B64: &str = "iVBORw0KGgo=";
const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const OBJECT_PATH: &str = r"^/storage/v1/object/images/[0-9a-f-]{36}\.png$";

fn storage(server: &MockServer) -> SupabaseStorage {
    SupabaseStorage::new(
        reqwest::Client::new(),
        &SupabaseStorageConfig {
            url: Some(server.uri()),
            key: Some("service-key".into()),
            bucket: "images".into(),
        },
    )
}

async fn mount_bucket_exists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "images", "name": "images", "public": true
        })))
        .mount(server)
        .await;
}

async fn mount_object_upload(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path_regex(OBJECT_PATH))
        .and(header("apikey", "service-key"))
        .and(header("Authorization", "Bearer service-key"))
        .and(header("x-upsert", "false"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn upload_returns_public_url() {
    let server = MockServer::start().await;
    mount_bucket_exists(&server).await;
    mount_object_upload(&server, 200, json!({ "Key": "images/x.png" })).await;

    let url = storage(&server).upload(PNG_B64).await.unwrap();

    let prefix = format!("{}/storage/v1/object/public/images/", server.uri());
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));
}

#[tokio::test]
async fn same_bytes_uploaded_twice_get_distinct_urls() {
    let server = MockServer::start().await;
    mount_bucket_exists(&server).await;
    mount_object_upload(&server, 200, json!({})).await;

    let storage = storage(&server);
    let first = storage.upload(PNG_B64).await.unwrap();
    let second = storage.upload(PNG_B64).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn data_uri_prefix_is_stripped_before_upload() {
    let server = MockServer::start().await;
    mount_bucket_exists(&server).await;
    mount_object_upload(&server, 200, json!({})).await;

    storage(&server)
        .upload(&format!("data:image/jpeg;base64,{PNG_B64}"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let upload = received
        .iter()
        .find(|r| r.url.path().starts_with("/storage/v1/object/"))
        .expect("object upload request");
    assert_eq!(upload.body, PNG_BYTES);
}

#[tokio::test]
async fn missing_bucket_is_created_as_public() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket/images"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": "404", "error": "Bucket not found", "message": "Bucket not found"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/bucket"))
        .and(body_partial_json(json!({ "id": "images", "name": "images", "public": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "images" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_object_upload(&server, 200, json!({})).await;

    assert!(storage(&server).upload(PNG_B64).await.is_ok());
}

#[tokio::test]
async fn failed_bucket_creation_still_attempts_upload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/bucket/images"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/bucket"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "new row violates row-level security policy"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_object_upload(&server, 200, json!({})).await;

    assert!(storage(&server).upload(PNG_B64).await.is_ok());
}

#[tokio::test]
async fn rejected_upload_is_reported() {
    let server = MockServer::start().await;
    mount_bucket_exists(&server).await;
    mount_object_upload(
        &server,
        403,
        json!({ "statusCode": "403", "error": "Unauthorized", "message": "permission denied" }),
    )
    .await;

    let err = storage(&server).upload(PNG_B64).await.unwrap_err();
    assert_matches!(err, StorageError::Upload { backend: "Supabase", .. });
    assert_eq!(
        err.to_string(),
        "Failed to upload image to Supabase: permission denied"
    );
}

#[tokio::test]
async fn missing_project_url_is_not_configured() {
    let storage = SupabaseStorage::new(
        reqwest::Client::new(),
        &SupabaseStorageConfig {
            url: None,
            key: Some("service-key".into()),
            bucket: "images".into(),
        },
    );

    let err = storage.upload(PNG_B64).await.unwrap_err();
    assert_matches!(err, StorageError::NotConfigured("SUPABASE_URL"));
}
