//! Transcript entries.
//!
//! A [`Turn`] is one message in the conversation. It carries two texts: the one shown in the
//! transcript and the one sent upstream, which for user turns also holds the document context.

use serde::{Deserialize, Serialize};

/// Monotonic identifier of a turn within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(u64);

impl TurnId {
    /// The first identifier handed out by a fresh conversation.
    pub const FIRST: Self = Self(1);

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for TurnId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Input typed by the human.
    User,
    /// Reply produced by the model (or a fallback standing in for one).
    Assistant,
}

/// One immutable message of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    role: Role,
    display_text: String,
    api_text: String,
}

impl Turn {
    pub(crate) const fn new(id: TurnId, role: Role, display_text: String, api_text: String) -> Self {
        Self {
            id,
            role,
            display_text,
            api_text,
        }
    }

    /// Identifier assigned when the turn was appended.
    #[must_use]
    pub const fn id(&self) -> TurnId {
        self.id
    }

    /// Who wrote this turn.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Text rendered in the transcript.
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Text sent to the model.
    #[must_use]
    pub fn api_text(&self) -> &str {
        &self.api_text
    }

    /// Returns `true` for turns authored by the user.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.role, Role::User)
    }
}
