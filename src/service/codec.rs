//! Text encoding for binary fields crossing the API boundary.

use crate::error::CoreError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encode a binary field as standard base64. Empty bytes give `""`.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64. An empty string decodes to empty bytes.
pub fn base64_to_bytes(text: &str) -> Result<Vec<u8>, CoreError> {
    Ok(STANDARD.decode(text)?)
}
