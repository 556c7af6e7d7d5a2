use thiserror::Error;

/// User input rejected before anything is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input was empty or whitespace only.
    #[error("message is empty")]
    Empty,
}

/// Reasons a send action did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    /// The input was empty or whitespace only.
    #[error("message is empty")]
    Empty,
    /// A previous request has not completed yet.
    #[error("still waiting for the previous reply")]
    Busy,
}

impl From<ValidationError> for SendError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::Empty => Self::Empty,
        }
    }
}

/// Failures while turning an uploaded document into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The declared content type is not `application/pdf`.
    #[error("unsupported document type `{0}`, only application/pdf is accepted")]
    UnsupportedType(String),
    /// The bytes do not decode as a PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),
    /// A single page could not be read.
    #[error("failed to extract text from page {page}: {reason}")]
    Page {
        /// One-based page number.
        page: usize,
        /// Parser message.
        reason: String,
    },
    /// The document could not be read from disk.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    /// The parsing capability is not available for this document.
    #[error("PDF parser unavailable: {0}")]
    Unavailable(String),
}
