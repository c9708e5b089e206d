/// Credentials for the generation backends.
///
/// Every key is optional: a missing key is only reported when the matching
/// backend is actually called.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub stability_api_key: Option<String>,
}

impl GenerationConfig {
    /// Load credentials from environment variables.
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `OPENAI_API_KEY`    | no       |
    /// | `GEMINI_API_KEY`    | no       |
    /// | `STABILITY_API_KEY` | no       |
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            stability_api_key: non_empty_var("STABILITY_API_KEY"),
        }
    }
}

/// Read an environment variable, treating an empty value as unset.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
