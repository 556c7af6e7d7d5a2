//! In-memory conversation state.
//!
//! The transcript is append-only: turns are created here, handed out as clones and never edited
//! or removed afterwards. The remaining fields are flags the front end renders.

use serde::{Deserialize, Serialize};

use crate::{
    compose::compose_api_text,
    error::ValidationError,
    turn::{Role, Turn, TurnId},
};

/// Transcript plus the ephemeral flags of one chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    turns: Vec<Turn>,
    pending_reply: bool,
    last_document_label: Option<String>,
    last_extracted_text: String,
    next_id: TurnId,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turns: Vec::new(),
            pending_reply: false,
            last_document_label: None,
            last_extracted_text: String::new(),
            next_id: TurnId::FIRST,
        }
    }

    /// Appends a user turn.
    ///
    /// The displayed text is the trimmed input; the upstream text additionally carries the
    /// currently held document text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for empty or whitespace-only input, in which case
    /// nothing is appended.
    pub fn append_user_turn(&mut self, text: &str) -> Result<Turn, ValidationError> {
        let display = text.trim();
        if display.is_empty() {
            return Err(ValidationError::Empty);
        }
        let api_text = compose_api_text(display, &self.last_extracted_text);
        Ok(self.push(Role::User, display.to_owned(), api_text))
    }

    /// Appends an assistant turn whose displayed and upstream texts are identical.
    pub fn append_assistant_turn(&mut self, text: impl Into<String>) -> Turn {
        let text = text.into();
        self.push(Role::Assistant, text.clone(), text)
    }

    fn push(&mut self, role: Role, display_text: String, api_text: String) -> Turn {
        let turn = Turn::new(self.next_id, role, display_text, api_text);
        self.next_id = self.next_id.next();
        self.turns.push(turn.clone());
        turn
    }

    /// Sets the typing indicator.
    pub const fn set_pending(&mut self, pending: bool) {
        self.pending_reply = pending;
    }

    /// Records the name of the most recently uploaded document.
    pub fn set_document_label(&mut self, label: impl Into<String>) {
        self.last_document_label = Some(label.into());
    }

    /// Replaces the document text attached to later user turns.
    pub fn set_extracted_text(&mut self, text: impl Into<String>) {
        self.last_extracted_text = text.into();
    }

    /// All turns in creation order.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Most recently appended turn.
    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Whether a reply is outstanding.
    #[must_use]
    pub const fn pending_reply(&self) -> bool {
        self.pending_reply
    }

    /// Name of the last uploaded document, if any.
    #[must_use]
    pub fn last_document_label(&self) -> Option<&str> {
        self.last_document_label.as_deref()
    }

    /// Text of the last successful extraction (empty before the first one).
    #[must_use]
    pub fn last_extracted_text(&self) -> &str {
        &self.last_extracted_text
    }
}
