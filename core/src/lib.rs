//! # pagechat-core
//!
//! Conversation state and request plumbing for a document-aware chat client.
//!
//! The crate knows nothing about HTTP or PDF internals. It combines user input, prior turns and
//! the text of the last uploaded document into a request, hands that request to a
//! [`Transport`], and folds the reply back into the transcript.
//!
//! ```text
//!   Upload ──▶ TextExtractor ──▶ ConversationState.last_extracted_text
//!                                        │
//!   input ──▶ ConversationState ──▶ compose ──▶ Transport ──▶ ingest ──▶ assistant turn
//! ```
//!
//! [`ChatController`] ties the pieces together and enforces that at most one request is in
//! flight.
//!
//! ```rust,ignore
//! use pagechat_core::{ChatController, Upload};
//!
//! let chat = ChatController::new(transport, extractor);
//! chat.upload(&Upload::pdf("paper.pdf", bytes)).await?;
//! let reply = chat.send("Summarize the introduction").await?;
//! println!("{}", reply.display_text());
//! ```

pub mod compose;
pub mod controller;
mod error;
pub mod extract;
pub mod ingest;
pub mod state;
pub mod transport;
pub mod turn;

#[doc(inline)]
pub use compose::{ChatRequest, Content, DOCUMENT_MARKER, Part, Speaker, compose, compose_api_text};
#[doc(inline)]
pub use controller::{ChatController, Phase, TRANSPORT_FALLBACK};
pub use error::{ExtractionError, SendError, ValidationError};
#[doc(inline)]
pub use extract::{PDF_CONTENT_TYPE, PageOpener, PageSource, PagedExtractor, TextExtractor, Upload};
#[doc(inline)]
pub use ingest::{FALLBACK_REPLY, ingest};
#[doc(inline)]
pub use state::ConversationState;
#[doc(inline)]
pub use transport::Transport;
#[doc(inline)]
pub use turn::{Role, Turn, TurnId};
