//! Helpers for the base64 image payloads passed between generation and storage.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use uuid::Uuid;

/// File extension of every stored image.
pub const IMAGE_EXTENSION: &str = "png";

/// Content type of every stored image.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

static DATA_URI_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("valid regex"));

/// Remove a leading `data:image/<fmt>;base64,` prefix, if present.
pub fn strip_data_uri_prefix(payload: &str) -> &str {
    match DATA_URI_PREFIX_RE.find(payload) {
        Some(m) => &payload[m.end()..],
        None => payload,
    }
}

/// Decode a base64 image payload (with or without a data-URI prefix) to raw bytes.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(strip_data_uri_prefix(payload))
}

/// Fresh object key for a stored image. Never reused.
pub fn new_image_key() -> String {
    format!("{}.{IMAGE_EXTENSION}", Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
