use base64::{Engine as _, engine::general_purpose};

use super::errors::PhotoTooLarge;

/// Fails with `PhotoTooLarge` when `size` exceeds `limit`. A file of exactly
/// `limit` bytes is accepted.
pub fn check_photo_size(size: u64, limit: u64) -> Result<(), PhotoTooLarge> {
    if size > limit {
        Err(PhotoTooLarge { size, limit })
    } else {
        Ok(())
    }
}

/// Encodes image bytes as a `data:<mime>;base64,...` URI.
///
/// An empty or non-image MIME type falls back to `image/*`, the same generic
/// type the preview uses for inline images.
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    let mime = mime.trim();
    let mime = if mime.starts_with("image/") { mime } else { "image/*" };
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// True for `data:` URIs carrying a base64 payload.
pub fn is_data_uri(value: &str) -> bool {
    value.starts_with("data:") && value.contains(";base64,")
}
