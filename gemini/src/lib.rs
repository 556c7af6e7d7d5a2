//! Gemini transport for `pagechat`.
//!
//! Posts the composed conversation to the Gemini Developer API `generateContent` endpoint and
//! hands back the raw JSON envelope. Reply extraction and fallbacks live in `pagechat-core`.
//!
//! Any JSON body is returned as the envelope, including Google's error envelope on a 4xx/5xx
//! (logged at `warn`). [`GeminiError`] is reserved for requests that never produced JSON: connect
//! and timeout failures, unreadable bodies, and non-JSON responses.
//!
//! # Quick start
//!
//! ```no_run
//! use pagechat_core::{ConversationState, Transport, compose, ingest};
//! use pagechat_gemini::GeminiBackend;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gemini = GeminiBackend::new(std::env::var("GEMINI_API_KEY")?);
//! let mut state = ConversationState::new();
//! state.append_user_turn("Explain Tokio in two bullet points.")?;
//! let envelope = gemini.send(&compose(state.turns())).await?;
//! println!("{}", ingest(&envelope));
//! # Ok(()) }
//! ```
//!
//! Set `PAGECHAT_GEMINI_DEBUG=1` to log full request and response bodies at debug level.

mod client;
mod config;
mod error;

use pagechat_core::{ChatRequest, Transport};
use serde_json::Value;

pub use config::{AuthMode, DEFAULT_MODEL, GEMINI_API_BASE_URL, GeminiBackend};
pub use error::GeminiError;

impl Transport for GeminiBackend {
    type Error = GeminiError;

    async fn send(&self, request: &ChatRequest) -> Result<Value, GeminiError> {
        client::call_generate(self.client(), self.config(), request).await
    }
}

/// Create a Gemini backend configured to use the `gemini-2.0-flash` model.
#[must_use]
pub fn gemini_2_0_flash(key: impl Into<String>) -> GeminiBackend {
    GeminiBackend::new(key).with_model("gemini-2.0-flash")
}

/// Create a Gemini backend configured to use the `gemini-2.5-flash` model.
#[must_use]
pub fn gemini_2_5_flash(key: impl Into<String>) -> GeminiBackend {
    GeminiBackend::new(key).with_model("gemini-2.5-flash")
}

/// Create a Gemini backend configured to use the `gemini-2.5-pro` model.
#[must_use]
pub fn gemini_2_5_pro(key: impl Into<String>) -> GeminiBackend {
    GeminiBackend::new(key).with_model("gemini-2.5-pro")
}
