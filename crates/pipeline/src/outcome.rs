//! The two stages an image passes through before it becomes a response.

use imagegate_core::generation::GenerationResult;
use imagegate_core::provider::ProviderName;
use imagegate_storage::{StorageError, StorageProvider};

/// An image fresh from a generation backend, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub provider: ProviderName,
    pub image: String,
}

impl GenerationOutcome {
    /// Upload the image. A failed upload is logged and kept as
    /// [`PersistedOutcome::PersistFailed`] so the image is still returned.
    pub async fn persist(self, storage: &StorageProvider) -> PersistedOutcome {
        match storage.upload(&self.image).await {
            Ok(url) => PersistedOutcome::Persisted {
                provider: self.provider,
                url,
            },
            Err(reason) => {
                tracing::error!(
                    provider = %self.provider,
                    storage = %storage.name(),
                    error = %reason,
                    "Failed to persist image, returning it inline"
                );
                PersistedOutcome::PersistFailed {
                    provider: self.provider,
                    image: self.image,
                    reason,
                }
            }
        }
    }
}

/// Where the generated image ended up.
#[derive(Debug)]
pub enum PersistedOutcome {
    Persisted {
        provider: ProviderName,
        url: String,
    },
    PersistFailed {
        provider: ProviderName,
        image: String,
        reason: StorageError,
    },
}

impl PersistedOutcome {
    pub fn into_result(self) -> GenerationResult {
        match self {
            Self::Persisted { provider, url } => GenerationResult::persisted(provider, url),
            Self::PersistFailed {
                provider, image, ..
            } => GenerationResult::inline(provider, image),
        }
    }
}
