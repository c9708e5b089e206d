//! Image generation request validation and result payload.

use serde::Serialize;

use crate::error::CoreError;
use crate::provider::ProviderName;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum prompt length, counted in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const PROMPT_TOO_LONG: &str = "Prompt is too long";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Collect every problem with `prompt`. An empty list means the prompt is valid.
pub fn prompt_issues(prompt: &str) -> Vec<&'static str> {
    let mut issues = Vec::new();
    if prompt.is_empty() {
        issues.push(PROMPT_REQUIRED);
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        issues.push(PROMPT_TOO_LONG);
    }
    issues
}

/// Validate a prompt, joining all issues into a single validation error.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    let issues = prompt_issues(prompt);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(issues.join(", ")))
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A validated image generation request.
///
/// Only constructible through [`GenerationRequest::new`], so holding one
/// proves the prompt passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    reference_images: Option<Vec<String>>,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        reference_images: Option<Vec<String>>,
    ) -> Result<Self, CoreError> {
        let prompt = prompt.into();
        validate_prompt(&prompt)?;
        Ok(Self {
            prompt,
            reference_images,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Base64 reference images supplied by the caller. Accepted but not yet
    /// forwarded to any backend.
    pub fn reference_images(&self) -> &[String] {
        self.reference_images.as_deref().unwrap_or_default()
    }

    /// Short prompt preview for log lines.
    pub fn prompt_preview(&self) -> String {
        let preview: String = self.prompt.chars().take(20).collect();
        format!("{preview}...")
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Successful generation payload returned to the caller.
///
/// Exactly one of `image_url` / `image_base64` is set: the URL when the image
/// was persisted, the inline bytes otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub provider_used: ProviderName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GenerationResult {
    /// Result for an image that was uploaded to storage.
    pub fn persisted(provider: ProviderName, url: String) -> Self {
        Self {
            success: true,
            provider_used: provider,
            image_base64: None,
            image_url: Some(url),
        }
    }

    /// Result carrying the image inline.
    pub fn inline(provider: ProviderName, image_base64: String) -> Self {
        Self {
            success: true,
            provider_used: provider,
            image_base64: Some(image_base64),
            image_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
