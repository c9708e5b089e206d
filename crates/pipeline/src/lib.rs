//! Orchestration of a single image request: select the configured generation
//! backend, generate, persist best effort, and shape the caller's result.

pub mod error;
pub mod outcome;
pub mod service;

pub use error::ImageServiceError;
pub use outcome::{GenerationOutcome, PersistedOutcome};
pub use service::ImageService;
