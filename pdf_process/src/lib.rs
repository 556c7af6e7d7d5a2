//! PDF text extraction for pagechat.
//!
//! Wraps `lopdf` behind the page-by-page
//! [`PageOpener`](pagechat_core::PageOpener)/[`PageSource`](pagechat_core::PageSource) interface
//! of `pagechat-core`, so the resulting [`PdfExtractor`] concatenates page texts in ascending page
//! order with a newline after each page.
//!
//! ```no_run
//! use pagechat_core::TextExtractor;
//!
//! # async fn run() -> Result<(), pagechat_core::ExtractionError> {
//! let bytes = std::fs::read("paper.pdf")?;
//! let text = pagechat_pdf::extractor().extract(&bytes).await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

mod parser;
mod upload;

use pagechat_core::PagedExtractor;

pub use parser::{LopdfDocument, LopdfOpener};
pub use upload::read_upload;

/// Text extractor backed by `lopdf`.
pub type PdfExtractor = PagedExtractor<LopdfOpener>;

/// Creates the default PDF extractor.
#[must_use]
pub const fn extractor() -> PdfExtractor {
    PagedExtractor::new(LopdfOpener)
}
