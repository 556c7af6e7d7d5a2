use std::path::Path;

use pagechat_core::{ExtractionError, Upload};

/// Reads a file from disk into an [`Upload`].
///
/// There is no browser to declare a content type here, so it is guessed from the file
/// extension. Anything without a `.pdf` extension ends up with a non-PDF type and is rejected
/// by the controller before parsing.
///
/// # Errors
///
/// [`ExtractionError::Io`] when the file cannot be read.
pub async fn read_upload(path: impl AsRef<Path>) -> Result<Upload, ExtractionError> {
    let path = path.as_ref();
    let bytes = async_fs::read(path).await?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned();
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::debug!(%name, %content_type, bytes = bytes.len(), "read upload from disk");
    Ok(Upload::new(name, content_type, bytes))
}
