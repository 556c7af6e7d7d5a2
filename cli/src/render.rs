//! Terminal rendering of transcript state.

use pagechat_core::{Role, Turn};

/// Shown while a reply is pending.
pub const TYPING: &str = "Typing...";

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Speaker label for a role.
#[must_use]
pub const fn label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "AI",
    }
}

/// Renders one turn as `label> text`.
///
/// Only the display text is shown; document text attached for the model never reaches the screen.
#[must_use]
pub fn turn(turn: &Turn) -> String {
    format!("{}> {}", label(turn.role()), turn.display_text())
}

/// Renders the whole transcript, one turn per entry.
#[must_use]
pub fn history(turns: &[Turn], document: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(name) = document {
        out.push_str(&uploaded(name));
        out.push('\n');
    }
    if turns.is_empty() {
        out.push_str("No conversation history.");
        return out;
    }
    out.push_str(&format!("Conversation history ({} turns):", turns.len()));
    for t in turns {
        out.push_str(&format!("\n  [{}] {}", t.id(), truncate(&turn(t), 100)));
    }
    out
}

/// Confirmation line after a document was selected.
#[must_use]
pub fn uploaded(name: &str) -> String {
    format!("Uploaded: {name}")
}

/// Red error line after a failed upload.
#[must_use]
pub fn upload_failed(error: &impl std::fmt::Display) -> String {
    format!("\x1b[31mUpload failed: {error}{RESET}")
}

/// Dimmed typing indicator.
#[must_use]
pub fn typing() -> String {
    format!("{DIM}{TYPING}{RESET}")
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
