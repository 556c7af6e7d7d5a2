//! Outbound request composition.
//!
//! The wire shape follows the Gemini `generateContent` body:
//!
//! ```json
//! { "contents": [ { "role": "user", "parts": [ { "text": "..." } ] } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::turn::{Role, Turn};

/// Separator placed between the user's text and the held document text.
pub const DOCUMENT_MARKER: &str = "\n\n[Document Content]:\n";

/// Speaker names understood by the model API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Human input.
    User,
    /// Model output.
    Model,
}

impl From<Role> for Speaker {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Assistant => Self::Model,
        }
    }
}

/// A single text part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The text payload.
    pub text: String,
}

/// One entry of the `contents` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who said it.
    pub role: Speaker,
    /// Always exactly one text part for this client.
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a single-part content entry.
    pub fn text(role: Speaker, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Request body sent to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Full conversation history, oldest first.
    pub contents: Vec<Content>,
}

impl ChatRequest {
    /// Number of history entries carried by the request.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns `true` when the request carries no history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Builds the upstream text for a user turn.
///
/// The marker is appended even when `extracted` is empty so every request has the same shape.
#[must_use]
pub fn compose_api_text(input: &str, extracted: &str) -> String {
    let input = input.trim();
    let mut text = String::with_capacity(input.len() + DOCUMENT_MARKER.len() + extracted.len());
    text.push_str(input);
    text.push_str(DOCUMENT_MARKER);
    text.push_str(extracted);
    text
}

/// Maps the transcript to a request body, keeping every turn in order.
#[must_use]
pub fn compose(history: &[Turn]) -> ChatRequest {
    ChatRequest {
        contents: history
            .iter()
            .map(|turn| Content::text(turn.role().into(), turn.api_text()))
            .collect(),
    }
}
