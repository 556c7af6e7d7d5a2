//! Session steps shared by the startup flags and the REPL.

use std::path::Path;

use pagechat_core::{ChatController, ExtractionError, TextExtractor, Transport};

use crate::render;

/// Reads `path` and hands it to the controller.
///
/// Returns the document name on success.
///
/// # Errors
///
/// Read failures from disk, or whatever [`ChatController::upload`] reports.
pub async fn upload<T, X>(chat: &ChatController<T, X>, path: &Path) -> Result<String, ExtractionError>
where
    T: Transport,
    X: TextExtractor,
{
    let file = pagechat_pdf::read_upload(path).await?;
    chat.upload(&file).await?;
    Ok(file.name().to_string())
}

/// Uploads `path` and returns the line to show. Never fails; the session keeps going.
pub async fn upload_and_report<T, X>(chat: &ChatController<T, X>, path: &Path) -> String
where
    T: Transport,
    X: TextExtractor,
{
    match upload(chat, path).await {
        Ok(name) => render::uploaded(&name),
        Err(error) => render::upload_failed(&error),
    }
}
