//! Image payload checks.
//!
//! Images travel as data URLs (`data:image/png;base64,...`) or as remote
//! URLs. Only data URLs are inspected; remote URLs are the server's concern.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::validation::ValidationError;

/// Largest image accepted for avatars and message attachments.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:")
}

/// Media type of a data URL, e.g. `image/png`.
pub fn data_url_mime(value: &str) -> Option<&str> {
    let header = value.strip_prefix("data:")?.split(',').next()?;
    let mime = header.split(';').next().unwrap_or_default();
    (!mime.is_empty()).then_some(mime)
}

/// Size in bytes of the decoded payload of a data URL.
///
/// Returns `None` for anything that is not a data URL or whose base64 body
/// does not decode.
pub fn data_url_payload_len(value: &str) -> Option<usize> {
    let (header, payload) = value.strip_prefix("data:")?.split_once(',')?;
    if header.ends_with(";base64") {
        STANDARD.decode(payload.trim_end()).ok().map(|bytes| bytes.len())
    } else {
        Some(payload.len())
    }
}

/// Rejects data URLs that are not images or exceed [`MAX_IMAGE_BYTES`].
pub fn validate_image(value: &str) -> Result<(), ValidationError> {
    if !is_data_url(value) {
        return Ok(());
    }
    match data_url_mime(value) {
        Some(mime) if mime.starts_with("image/") => {}
        _ => return Err(ValidationError::NotAnImage),
    }
    match data_url_payload_len(value) {
        Some(len) if len <= MAX_IMAGE_BYTES => Ok(()),
        Some(_) => Err(ValidationError::image_too_large()),
        None => Err(ValidationError::NotAnImage),
    }
}
