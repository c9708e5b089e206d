//! Supabase Storage backend, spoken over its REST API.
//!
//! The target bucket is probed before every upload and created as a public
//! bucket when the probe fails. Creation is best effort: the bucket may exist
//! but be hidden from this key by row-level security, so the upload is
//! attempted regardless and reports the real failure.

use imagegate_core::image::{decode_image, new_image_key, IMAGE_CONTENT_TYPE};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

use crate::config::SupabaseStorageConfig;
use crate::error::StorageError;

const BACKEND: &str = "Supabase";

/// Supabase Storage uploader bound to one project and bucket.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    url: Option<String>,
    key: Option<String>,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: reqwest::Client, config: &SupabaseStorageConfig) -> Self {
        if config.url.is_none() || config.key.is_none() {
            tracing::warn!("Supabase credentials missing. SupabaseStorage will fail.");
        }
        Self {
            client,
            url: config.url.as_ref().map(|u| u.trim_end_matches('/').to_string()),
            key: config.key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(base: &str, bucket: &str, key: &str) -> String {
        format!("{base}/storage/v1/object/public/{bucket}/{key}")
    }

    /// Store one image under a fresh key and return its public URL.
    pub async fn upload(&self, image_base64: &str) -> Result<String, StorageError> {
        let base = self
            .url
            .as_deref()
            .ok_or(StorageError::NotConfigured("SUPABASE_URL"))?;
        let api_key = self
            .key
            .as_deref()
            .ok_or(StorageError::NotConfigured("SUPABASE_KEY"))?;

        let bytes = decode_image(image_base64)?;
        let file_name = new_image_key();

        self.ensure_bucket(base, api_key).await;

        let response = self
            .client
            .post(format!("{base}/storage/v1/object/{}/{file_name}", self.bucket))
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, IMAGE_CONTENT_TYPE)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| upload_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upload_failed(api_error_message(&body, status.as_u16())));
        }

        let url = Self::public_url(base, &self.bucket, &file_name);
        tracing::info!(%url, "Image uploaded to Supabase Storage");
        Ok(url)
    }

    /// Make sure the bucket exists, creating it as public if it does not.
    /// Never fails.
    async fn ensure_bucket(&self, base: &str, api_key: &str) {
        let probe = self
            .client
            .get(format!("{base}/storage/v1/bucket/{}", self.bucket))
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .send()
            .await;

        if matches!(&probe, Ok(r) if r.status().is_success()) {
            return;
        }

        tracing::info!(bucket = %self.bucket, "Bucket not found, attempting to create");

        let created = self
            .client
            .post(format!("{base}/storage/v1/bucket"))
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .json(&json!({
                "id": self.bucket,
                "name": self.bucket,
                "public": true,
            }))
            .send()
            .await;

        match created {
            Ok(r) if r.status().is_success() => {
                tracing::info!(bucket = %self.bucket, "Bucket created");
            }
            Ok(r) => {
                let status = r.status().as_u16();
                let body = r.text().await.unwrap_or_default();
                tracing::error!(
                    bucket = %self.bucket,
                    error = %api_error_message(&body, status),
                    "Failed to create bucket"
                );
            }
            Err(e) => {
                tracing::error!(bucket = %self.bucket, error = %e, "Failed to create bucket");
            }
        }
    }
}

fn upload_failed(message: String) -> StorageError {
    tracing::error!(error = %message, "Supabase upload failed");
    StorageError::Upload {
        backend: BACKEND,
        message,
    }
}

/// Storage API errors look like `{ "statusCode": "409", "error": "Duplicate", "message": "..." }`.
fn api_error_message(body: &str, status: u16) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("error")))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}
