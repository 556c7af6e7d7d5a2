//! One request/response cycle at a time.
//!
//! ```text
//!          send (non-empty)
//!   Idle ───────────────────▶ AwaitingReply
//!    ▲                             │
//!    └──── reply or fallback ◀─────┘
//! ```
//!
//! The controller owns the [`ConversationState`]. Every mutation happens inside a short critical
//! section that is never held across an `.await`, so an upload can run while a reply is pending.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::{
    compose::compose,
    error::{ExtractionError, SendError},
    extract::{TextExtractor, Upload},
    ingest::ingest,
    state::ConversationState,
    transport::Transport,
    turn::Turn,
};

/// Assistant text appended when the transport fails.
pub const TRANSPORT_FALLBACK: &str = "Failed to get a response from the AI.";

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to send.
    Idle,
    /// A request is in flight.
    AwaitingReply,
}

/// Drives the conversation against a transport and a document extractor.
#[derive(Debug)]
pub struct ChatController<T, X> {
    transport: T,
    extractor: X,
    state: Mutex<ConversationState>,
}

/// Clears the pending flag when the send future finishes or is dropped.
struct PendingGuard<'a> {
    state: &'a Mutex<ConversationState>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).set_pending(false);
    }
}

fn lock(state: &Mutex<ConversationState>) -> MutexGuard<'_, ConversationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Transport, X: TextExtractor> ChatController<T, X> {
    /// Creates a controller with an empty conversation.
    pub fn new(transport: T, extractor: X) -> Self {
        Self {
            transport,
            extractor,
            state: Mutex::new(ConversationState::new()),
        }
    }

    /// Sends `input` and waits for the reply.
    ///
    /// Returns the assistant turn that was appended. Transport failures do not surface here:
    /// they become a [`TRANSPORT_FALLBACK`] turn.
    ///
    /// # Errors
    ///
    /// [`SendError::Empty`] for blank input and [`SendError::Busy`] while another reply is
    /// outstanding. Neither appends a turn nor issues a request.
    pub async fn send(&self, input: &str) -> Result<Turn, SendError> {
        let request = {
            let mut state = lock(&self.state);
            if state.pending_reply() {
                return Err(SendError::Busy);
            }
            state.append_user_turn(input)?;
            state.set_pending(true);
            compose(state.turns())
        };
        let _pending = PendingGuard { state: &self.state };

        debug!(contents = request.len(), "sending chat request");
        let reply = match self.transport.send(&request).await {
            Ok(envelope) => ingest(&envelope),
            Err(error) => {
                warn!(%error, "chat request failed");
                TRANSPORT_FALLBACK.to_owned()
            }
        };

        let turn = lock(&self.state).append_assistant_turn(reply);
        Ok(turn)
    }

    /// Extracts text from an uploaded document and holds it for later requests.
    ///
    /// Accepted in either phase. The label is updated as soon as the document type is
    /// accepted; the held text only changes when extraction succeeds.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::UnsupportedType`] for anything not declared as a PDF (the extractor
    /// is not called), or whatever the extractor reports.
    pub async fn upload(&self, upload: &Upload) -> Result<(), ExtractionError> {
        if !upload.is_pdf() {
            return Err(ExtractionError::UnsupportedType(
                upload.content_type().to_owned(),
            ));
        }
        lock(&self.state).set_document_label(upload.name());

        match self.extractor.extract(upload.bytes()).await {
            Ok(text) => {
                debug!(name = upload.name(), bytes = text.len(), "document text stored");
                lock(&self.state).set_extracted_text(text);
                Ok(())
            }
            Err(error) => {
                warn!(name = upload.name(), %error, "document extraction failed");
                Err(error)
            }
        }
    }
}

impl<T, X> ChatController<T, X> {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        if lock(&self.state).pending_reply() {
            Phase::AwaitingReply
        } else {
            Phase::Idle
        }
    }

    /// A copy of the current state, for rendering.
    pub fn snapshot(&self) -> ConversationState {
        lock(&self.state).clone()
    }

    /// A copy of the transcript.
    pub fn transcript(&self) -> Vec<Turn> {
        lock(&self.state).turns().to_vec()
    }

    /// The transport this controller sends through.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The extractor used for uploads.
    pub const fn extractor(&self) -> &X {
        &self.extractor
    }
}
