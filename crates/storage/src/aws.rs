//! Amazon S3 backend.
//!
//! Objects are written without an ACL: public read access is expected to come
//! from the bucket policy.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use imagegate_core::image::{decode_image, new_image_key, IMAGE_CONTENT_TYPE};

use crate::config::AwsStorageConfig;
use crate::error::StorageError;

const BACKEND: &str = "AWS S3";

/// S3 uploader bound to one bucket and region.
#[derive(Debug, Clone)]
pub struct AwsStorage {
    client: aws_sdk_s3::Client,
    bucket: Option<String>,
    region: String,
}

impl AwsStorage {
    /// Build an S3 client from configuration.
    ///
    /// Uses the explicit key pair when both halves are configured and the SDK
    /// default credential chain otherwise.
    pub async fn from_config(config: &AwsStorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                loader = loader.credentials_provider(Credentials::new(
                    key_id.clone(),
                    secret.clone(),
                    None,
                    None,
                    "imagegate-env",
                ));
            }
            _ => {
                tracing::warn!(
                    "AWS credentials not fully configured; falling back to the default credential chain"
                );
            }
        }

        let sdk_config = loader.load().await;
        Self::with_client(
            aws_sdk_s3::Client::new(&sdk_config),
            config.bucket.clone(),
            config.region.clone(),
        )
    }

    /// Wrap an already configured S3 client.
    pub fn with_client(client: aws_sdk_s3::Client, bucket: Option<String>, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }

    /// Virtual-hosted-style URL of an object in this bucket.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("https://{bucket}.s3.{}.amazonaws.com/{key}", self.region)
    }

    /// Store one image under a fresh key and return its URL.
    pub async fn upload(&self, image_base64: &str) -> Result<String, StorageError> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or(StorageError::NotConfigured("AWS_S3_BUCKET_NAME"))?;

        let bytes = decode_image(image_base64)?;
        let key = new_image_key();

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(IMAGE_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(bucket, error = %message, "AWS S3 upload failed");
                StorageError::Upload {
                    backend: BACKEND,
                    message,
                }
            })?;

        let url = self.object_url(bucket, &key);
        tracing::info!(%url, "Image uploaded to AWS S3");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn offline_client() -> aws_sdk_s3::Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-2"))
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }

    #[test]
    fn object_url_uses_virtual_hosted_style() {
        let storage = AwsStorage::with_client(offline_client(), None, "eu-west-2".into());
        assert_eq!(
            storage.object_url("my-bucket", "abc.png"),
            "https://my-bucket.s3.eu-west-2.amazonaws.com/abc.png"
        );
    }

    #[tokio::test]
    async fn missing_bucket_fails_before_upload() {
        let storage = AwsStorage::with_client(offline_client(), None, "eu-west-2".into());
        let err = storage.upload("iVBORw0KGgo=").await.unwrap_err();
        assert_matches!(err, StorageError::NotConfigured("AWS_S3_BUCKET_NAME"));
        assert_eq!(err.to_string(), "AWS_S3_BUCKET_NAME is not configured");
    }

    #[tokio::test]
    async fn undecodable_payload_fails_before_upload() {
        let storage =
            AwsStorage::with_client(offline_client(), Some("my-bucket".into()), "eu-west-2".into());
        let err = storage.upload("%%%").await.unwrap_err();
        assert_matches!(err, StorageError::Decode(_));
    }
}
