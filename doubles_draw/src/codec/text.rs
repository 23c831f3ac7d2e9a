//! URL-safe text form of the binary encoding.
//!
//! Base64 with the URL-safe alphabet and no padding, so the result never
//! contains `+`, `/` or `=` and can be used as a path segment as is.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use super::binary::{decode, encode};
use super::errors::{CodecError, CodecResult};
use crate::tournament::Tournament;

pub fn bytes_to_text(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn text_to_bytes(text: &str) -> CodecResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(text.trim())
        .map_err(|e| CodecError::corrupt(format!("invalid text encoding: {e}")))
}

/// Encode a tournament for a share link.
pub fn encode_to_text(t: &Tournament) -> CodecResult<String> {
    Ok(bytes_to_text(&encode(t)?))
}

/// Decode a share link token.
pub fn decode_from_text(text: &str) -> CodecResult<Tournament> {
    decode(&text_to_bytes(text)?)
}
