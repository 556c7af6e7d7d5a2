//! Reply extraction from the model's response envelope.

use serde_json::Value;

/// Shown when the envelope carries no usable reply text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't understand that.";

/// JSON pointer to the first text part of the first candidate.
const REPLY_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Reads the reply text out of a `generateContent` response.
///
/// Missing, null, non-string and empty values all yield [`FALLBACK_REPLY`]. Never fails.
#[must_use]
pub fn ingest(envelope: &Value) -> String {
    envelope
        .pointer(REPLY_POINTER)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map_or_else(|| FALLBACK_REPLY.to_owned(), ToOwned::to_owned)
}
