//! Closed set of storage backends and the startup-time selection between them.

use imagegate_core::provider::StorageProviderName;

use crate::aws::AwsStorage;
use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::supabase::SupabaseStorage;

/// The storage backend chosen for this process.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    Aws(AwsStorage),
    Supabase(SupabaseStorage),
}

impl StorageProvider {
    /// Build the backend named by `config.provider`.
    ///
    /// An unrecognized name does not fail startup: it logs a warning and
    /// selects [`StorageProviderName::FALLBACK`].
    pub async fn from_config(client: &reqwest::Client, config: &StorageConfig) -> Self {
        let (name, fell_back) = StorageProviderName::resolve(&config.provider);
        if fell_back {
            tracing::warn!(
                configured = %config.provider,
                using = %name,
                "Unknown storage provider, falling back"
            );
        }

        let provider = match name {
            StorageProviderName::Aws => Self::Aws(AwsStorage::from_config(&config.aws).await),
            StorageProviderName::Supabase => {
                Self::Supabase(SupabaseStorage::new(client.clone(), &config.supabase))
            }
        };
        tracing::info!(provider = %name, "Storage provider selected");
        provider
    }

    pub fn name(&self) -> StorageProviderName {
        match self {
            Self::Aws(_) => StorageProviderName::Aws,
            Self::Supabase(_) => StorageProviderName::Supabase,
        }
    }

    /// Store one base64 image and return its public URL.
    pub async fn upload(&self, image_base64: &str) -> Result<String, StorageError> {
        match self {
            Self::Aws(s) => s.upload(image_base64).await,
            Self::Supabase(s) => s.upload(image_base64).await,
        }
    }
}
