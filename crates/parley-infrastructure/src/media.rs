//! Reads image files from disk and encodes them as data URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parley_core::ParleyError;
use parley_core::media::MAX_IMAGE_BYTES;
use parley_core::validation::ValidationError;

/// Encodes the image at `path` as `data:<mime>;base64,<payload>`.
///
/// Files that are not images, or larger than [`MAX_IMAGE_BYTES`], are
/// rejected before they are read into memory.
pub async fn image_file_to_data_url(path: &Path) -> Result<String, ParleyError> {
    let mime = mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .ok_or(ValidationError::NotAnImage)?;

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        ParleyError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    if metadata.len() > MAX_IMAGE_BYTES as u64 {
        return Err(ValidationError::image_too_large().into());
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("[Media] Encoded {} ({} bytes)", path.display(), bytes.len());
    Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes)))
}
