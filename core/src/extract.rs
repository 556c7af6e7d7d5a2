//! Document text extraction.
//!
//! The parser itself is an injected capability. [`PagedExtractor`] walks any [`PageOpener`] one
//! page at a time, in ascending order, and concatenates the page texts with a trailing newline
//! after each page.

use core::future::Future;

use tracing::debug;

use crate::error::ExtractionError;

/// The only content type accepted for uploads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A user-supplied document, as received from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl Upload {
    /// Wraps a document with its declared content type.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Wraps a document declared as `application/pdf`.
    pub fn pdf(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(name, PDF_CONTENT_TYPE, bytes)
    }

    /// File name shown as the upload label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw document bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Checks the declared type only; the bytes are not sniffed.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .split(';')
            .next()
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
    }
}

/// Turns a binary document into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extracts the text of every page, in page order, each page followed by `\n`.
    fn extract(&self, bytes: &[u8])
    -> impl Future<Output = Result<String, ExtractionError>> + Send;
}

/// An opened document that can be read page by page.
pub trait PageSource: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text of the one-based page `page`.
    fn page_text(&self, page: usize)
    -> impl Future<Output = Result<String, ExtractionError>> + Send;
}

/// Opens raw bytes as a [`PageSource`].
pub trait PageOpener: Send + Sync {
    /// The opened document type.
    type Document: PageSource;

    /// Parses `bytes` into a document.
    fn open(&self, bytes: &[u8])
    -> impl Future<Output = Result<Self::Document, ExtractionError>> + Send;
}

/// [`TextExtractor`] that reads pages sequentially from a [`PageOpener`].
#[derive(Debug, Clone, Default)]
pub struct PagedExtractor<O> {
    opener: O,
}

impl<O: PageOpener> PagedExtractor<O> {
    /// Wraps an opener.
    pub const fn new(opener: O) -> Self {
        Self { opener }
    }
}

impl<O: PageOpener> TextExtractor for PagedExtractor<O> {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let document = self.opener.open(bytes).await?;
        let pages = document.page_count();
        let mut text = String::new();
        for page in 1..=pages {
            text.push_str(&document.page_text(page).await?);
            text.push('\n');
        }
        debug!(pages, bytes = text.len(), "extracted document text");
        Ok(text)
    }
}
