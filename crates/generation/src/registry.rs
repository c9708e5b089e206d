//! Closed set of generation adapters and the lookup table built at startup.

use std::collections::HashMap;

use imagegate_core::generation::GenerationRequest;
use imagegate_core::provider::ProviderName;

use crate::config::GenerationConfig;
use crate::error::ProviderError;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::stability::StabilityProvider;

/// One configured generation backend.
#[derive(Debug, Clone)]
pub enum GenerationProvider {
    OpenAi(OpenAiProvider),
    Gemini(GeminiProvider),
    Stability(StabilityProvider),
}

impl GenerationProvider {
    /// Build the adapter for `name`, sharing the given HTTP client.
    pub fn build(name: ProviderName, client: &reqwest::Client, config: &GenerationConfig) -> Self {
        match name {
            ProviderName::OpenAi => Self::OpenAi(OpenAiProvider::new(
                client.clone(),
                config.openai_api_key.clone(),
            )),
            ProviderName::Gemini => Self::Gemini(GeminiProvider::new(
                client.clone(),
                config.gemini_api_key.clone(),
            )),
            ProviderName::Stability => Self::Stability(StabilityProvider::new(
                client.clone(),
                config.stability_api_key.clone(),
            )),
        }
    }

    pub fn name(&self) -> ProviderName {
        match self {
            Self::OpenAi(_) => ProviderName::OpenAi,
            Self::Gemini(_) => ProviderName::Gemini,
            Self::Stability(_) => ProviderName::Stability,
        }
    }

    /// Generate a single image and return it base64-encoded. Never retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        if !request.reference_images().is_empty() {
            tracing::debug!(
                provider = %self.name(),
                count = request.reference_images().len(),
                "Reference images are not supported yet; ignoring"
            );
        }

        match self {
            Self::OpenAi(p) => p.generate(request).await,
            Self::Gemini(p) => p.generate(request).await,
            Self::Stability(p) => p.generate(request).await,
        }
    }
}

/// Generation adapters keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderName, GenerationProvider>,
}

impl ProviderRegistry {
    /// Registry with every known backend, each sharing `client`.
    pub fn from_config(client: &reqwest::Client, config: &GenerationConfig) -> Self {
        let mut registry = Self::default();
        for name in ProviderName::ALL {
            registry.register(GenerationProvider::build(name, client, config));
        }
        registry
    }

    /// Add a backend, replacing any existing one with the same name.
    pub fn register(&mut self, provider: GenerationProvider) -> &mut Self {
        self.providers.insert(provider.name(), provider);
        self
    }

    pub fn get(&self, name: ProviderName) -> Option<&GenerationProvider> {
        self.providers.get(&name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
