use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::Result;

/// Decodes a base64-encoded image string into raw bytes.
///
/// Each adapter decodes the incoming string independently; the bytes are
/// never shared between them.
pub fn decode_image(image_b64: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(image_b64)?)
}
