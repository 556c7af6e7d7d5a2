//! # pagechat
//!
//! Facade crate that re-exports everything from [`pagechat_core`] plus the Gemini transport and
//! the PDF extractor behind feature flags. Pull this crate into your binary to chat with a
//! language model about a document.
//!
//! ## Features
//!
//! - `gemini` (default): [`gemini::GeminiBackend`], a [`Transport`] for the Gemini Developer API.
//! - `pdf` (default): [`pdf::extractor`], a [`TextExtractor`] built on `lopdf`.
//!
//! ## Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "gemini", feature = "pdf"))]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use pagechat::{ChatController, gemini::GeminiBackend, pdf};
//!
//! let chat = ChatController::new(GeminiBackend::new(std::env::var("GEMINI_API_KEY")?), pdf::extractor());
//! chat.upload(&pdf::read_upload("paper.pdf").await?).await?;
//! let reply = chat.send("What problem does this paper solve?").await?;
//! println!("{}", reply.display_text());
//! # Ok(())
//! # }
//! ```

pub use pagechat_core::*;

#[cfg(feature = "gemini")]
#[doc(inline)]
pub use pagechat_gemini as gemini;

#[cfg(feature = "pdf")]
#[doc(inline)]
pub use pagechat_pdf as pdf;
