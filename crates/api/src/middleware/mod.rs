//! Request extractors and response middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from the session cookie.
//! - [`error_detail::expose_error_detail`] -- Adds the error's debug rendering
//!   to error envelopes outside production.

pub mod auth;
pub mod error_detail;
