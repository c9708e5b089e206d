//! Authentication primitives.
//!
//! - [`google`] -- Google OAuth 2.0 authorization-code client.
//! - [`session`] -- Signed session tokens carrying the signed-in user.
//! - [`cookies`] -- Session and OAuth state cookie helpers.

pub mod cookies;
pub mod google;
pub mod session;
