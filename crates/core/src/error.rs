#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),
}
