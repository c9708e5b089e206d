use imagegate_generation::ProviderError;

/// Failure of an image request after validation.
///
/// Storage failures never appear here: they degrade the result instead.
#[derive(Debug, thiserror::Error)]
pub enum ImageServiceError {
    /// The configured default backend is unknown or not registered.
    #[error("Provider {0} not found")]
    ProviderNotFound(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ImageServiceError {
    /// HTTP status to report to the caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::ProviderNotFound(_) => 500,
            Self::Provider(e) => e.status(),
        }
    }
}
