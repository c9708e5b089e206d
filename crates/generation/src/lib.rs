//! Image generation backends.
//!
//! Each backend is a stateless adapter over one HTTP API that turns a
//! [`GenerationRequest`](imagegate_core::generation::GenerationRequest) into a
//! base64-encoded PNG. The adapters are gathered in the closed
//! [`GenerationProvider`] enum and looked up through a [`ProviderRegistry`].

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod registry;
pub mod stability;

mod upstream;

pub use config::GenerationConfig;
pub use error::ProviderError;
pub use registry::{GenerationProvider, ProviderRegistry};
