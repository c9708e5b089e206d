//! Domain types shared by every imagegate crate.
//!
//! - [`error`] -- the [`CoreError`](error::CoreError) taxonomy.
//! - [`provider`] -- closed sets of generation and storage backend names.
//! - [`generation`] -- the validated request and the result payload.
//! - [`image`] -- base64 image payload helpers (data-URI stripping, object keys).

pub mod error;
pub mod generation;
pub mod image;
pub mod provider;
