//! The image service shared by every request.

use imagegate_core::generation::{GenerationRequest, GenerationResult};
use imagegate_core::provider::ProviderName;
use imagegate_generation::{GenerationProvider, ProviderRegistry};
use imagegate_storage::StorageProvider;

use crate::error::ImageServiceError;
use crate::outcome::GenerationOutcome;

/// Generates with the configured default backend and persists the result.
///
/// Built once at startup. Holds no locks; every request runs its generate and
/// upload steps sequentially.
#[derive(Debug, Clone)]
pub struct ImageService {
    registry: ProviderRegistry,
    default_provider: String,
    storage: StorageProvider,
}

impl ImageService {
    pub fn new(
        registry: ProviderRegistry,
        default_provider: impl Into<String>,
        storage: StorageProvider,
    ) -> Self {
        Self {
            registry,
            default_provider: default_provider.into(),
            storage,
        }
    }

    /// Run one request end to end.
    ///
    /// Upload failures are not errors: the image is returned inline instead.
    pub async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ImageServiceError> {
        let provider = self.select_provider()?;

        tracing::info!(
            provider = %provider.name(),
            prompt = %request.prompt_preview(),
            "Generating image"
        );

        let image = provider.generate(request).await?;
        let generated = GenerationOutcome {
            provider: provider.name(),
            image,
        };

        Ok(generated.persist(&self.storage).await.into_result())
    }

    fn select_provider(&self) -> Result<&GenerationProvider, ImageServiceError> {
        self.default_provider
            .parse::<ProviderName>()
            .ok()
            .and_then(|name| self.registry.get(name))
            .ok_or_else(|| {
                tracing::error!(
                    provider = %self.default_provider,
                    "Default provider is not registered"
                );
                ImageServiceError::ProviderNotFound(self.default_provider.clone())
            })
    }
}
