use imagegate_core::provider::StorageProviderName;

/// Default AWS region.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default Supabase bucket.
pub const DEFAULT_SUPABASE_BUCKET: &str = "images";

/// Storage backend selection plus the settings of every backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Raw `STORAGE_PROVIDER` value; resolved when the provider is built.
    pub provider: String,
    pub aws: AwsStorageConfig,
    pub supabase: SupabaseStorageConfig,
}

#[derive(Debug, Clone)]
pub struct AwsStorageConfig {
    pub region: String,
    pub bucket: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SupabaseStorageConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub bucket: String,
}

impl StorageConfig {
    /// Load storage settings from environment variables.
    ///
    /// | Env Var                 | Default     |
    /// |-------------------------|-------------|
    /// | `STORAGE_PROVIDER`      | `supabase`  |
    /// | `AWS_REGION`            | `us-east-1` |
    /// | `AWS_S3_BUCKET_NAME`    | --          |
    /// | `AWS_ACCESS_KEY_ID`     | --          |
    /// | `AWS_SECRET_ACCESS_KEY` | --          |
    /// | `SUPABASE_URL`          | --          |
    /// | `SUPABASE_KEY`          | --          |
    /// | `SUPABASE_BUCKET_NAME`  | `images`    |
    pub fn from_env() -> Self {
        Self {
            provider: var("STORAGE_PROVIDER")
                .unwrap_or_else(|| StorageProviderName::FALLBACK.as_str().into()),
            aws: AwsStorageConfig {
                region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.into()),
                bucket: var("AWS_S3_BUCKET_NAME"),
                access_key_id: var("AWS_ACCESS_KEY_ID"),
                secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            },
            supabase: SupabaseStorageConfig {
                url: var("SUPABASE_URL"),
                key: var("SUPABASE_KEY"),
                bucket: var("SUPABASE_BUCKET_NAME")
                    .unwrap_or_else(|| DEFAULT_SUPABASE_BUCKET.into()),
            },
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
