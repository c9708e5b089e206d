/// Failure of a single upload. Never fatal to a generation request.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required setting is absent. Checked at upload time.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to upload image to {backend}: {message}")]
    Upload {
        backend: &'static str,
        message: String,
    },
}
