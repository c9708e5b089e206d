use imagegate_core::provider::ProviderName;

/// Status reported when an upstream failure carries no HTTP status of its own.
pub const DEFAULT_UPSTREAM_STATUS: u16 = 502;

/// Failure of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The backend's credential is not configured. Checked at call time.
    #[error("{} API Key not configured", .provider.label())]
    MissingApiKey { provider: ProviderName },

    /// The backend rejected the request, was unreachable, or answered
    /// without an image.
    #[error("{} Provider Error: {message}", .provider.label())]
    Upstream {
        provider: ProviderName,
        message: String,
        status: u16,
    },
}

impl ProviderError {
    pub(crate) fn upstream(
        provider: ProviderName,
        message: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
            status,
        }
    }

    /// The backend that produced this error.
    pub fn provider(&self) -> ProviderName {
        match self {
            Self::MissingApiKey { provider } | Self::Upstream { provider, .. } => *provider,
        }
    }

    /// HTTP status to report to the caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingApiKey { .. } => 500,
            Self::Upstream { status, .. } => *status,
        }
    }
}
