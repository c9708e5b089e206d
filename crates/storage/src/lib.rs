//! Object storage backends for generated images.
//!
//! Every backend takes a base64 image (optionally data-URI prefixed), stores
//! it under a fresh `<uuid>.png` key and returns a publicly resolvable URL.

pub mod aws;
pub mod config;
pub mod error;
pub mod provider;
pub mod supabase;

pub use config::StorageConfig;
pub use error::StorageError;
pub use provider::StorageProvider;
