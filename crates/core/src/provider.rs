//! Backend identities for image generation and object storage.
//!
//! Both sets are closed: adding a backend means adding a variant here, and
//! every `match` over the enum then points at the code that needs a new arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Generation providers
// ---------------------------------------------------------------------------

/// Image generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    OpenAi,
    Gemini,
    Stability,
}

impl ProviderName {
    /// Every generation backend, in registration order.
    pub const ALL: [ProviderName; 3] = [Self::OpenAi, Self::Gemini, Self::Stability];

    /// Configuration / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Stability => "stability",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Stability => "Stability",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Configuration(format!("Provider {s} not found")))
    }
}

// ---------------------------------------------------------------------------
// Storage providers
// ---------------------------------------------------------------------------

/// Object storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderName {
    Aws,
    Supabase,
}

impl StorageProviderName {
    pub const ALL: [StorageProviderName; 2] = [Self::Aws, Self::Supabase];

    /// Backend used when the configured name is missing or unrecognized.
    pub const FALLBACK: StorageProviderName = Self::Supabase;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Supabase => "supabase",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS S3",
            Self::Supabase => "Supabase",
        }
    }

    /// Resolve a configured name, falling back to [`Self::FALLBACK`].
    ///
    /// Returns the resolved backend and whether the fallback was taken, so
    /// the caller can log it.
    pub fn resolve(configured: &str) -> (Self, bool) {
        match configured.parse() {
            Ok(name) => (name, false),
            Err(_) => (Self::FALLBACK, true),
        }
    }
}

impl fmt::Display for StorageProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageProviderName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Configuration(format!("Unknown storage provider '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn provider_name_parses_wire_names() {
        assert_eq!("openai".parse::<ProviderName>().unwrap(), ProviderName::OpenAi);
        assert_eq!("gemini".parse::<ProviderName>().unwrap(), ProviderName::Gemini);
        assert_eq!(
            "stability".parse::<ProviderName>().unwrap(),
            ProviderName::Stability
        );
    }

    #[test]
    fn provider_name_is_case_sensitive() {
        assert_matches!(
            "OpenAI".parse::<ProviderName>(),
            Err(CoreError::Configuration(msg)) if msg == "Provider OpenAI not found"
        );
    }

    #[test]
    fn provider_name_serializes_lowercase() {
        let json = serde_json::to_value(ProviderName::OpenAi).unwrap();
        assert_eq!(json, "openai");
        assert_eq!(ProviderName::Stability.to_string(), "stability");
    }

    #[test]
    fn provider_labels() {
        assert_eq!(ProviderName::OpenAi.label(), "OpenAI");
        assert_eq!(ProviderName::Gemini.label(), "Gemini");
        assert_eq!(ProviderName::Stability.label(), "Stability");
    }

    #[test]
    fn storage_resolve_known_names() {
        assert_eq!(
            StorageProviderName::resolve("aws"),
            (StorageProviderName::Aws, false)
        );
        assert_eq!(
            StorageProviderName::resolve("supabase"),
            (StorageProviderName::Supabase, false)
        );
    }

    #[test]
    fn storage_resolve_unknown_falls_back_to_supabase() {
        assert_eq!(
            StorageProviderName::resolve("gcs"),
            (StorageProviderName::Supabase, true)
        );
        assert_eq!(
            StorageProviderName::resolve(""),
            (StorageProviderName::Supabase, true)
        );
    }
}
