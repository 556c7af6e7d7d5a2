//! Parsing of REPL input lines.

use std::path::PathBuf;

/// Commands understood by the REPL.
pub const HELP: &str = "Commands: /upload <path>, /history, /quit";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; ignored.
    Empty,
    /// Text to send to the model, untrimmed.
    Message(String),
    /// Load a PDF from disk.
    Upload(PathBuf),
    /// Reprint the transcript.
    History,
    /// Leave the REPL.
    Quit,
    /// A slash command that is not recognized, or is missing its argument.
    Unknown(String),
}

impl Command {
    /// Parses one input line.
    ///
    /// Anything not starting with `/` is a message and keeps its original spacing, since trimming
    /// belongs to the composer.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Message(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
        match name {
            "quit" | "exit" | "q" => Self::Quit,
            "history" => Self::History,
            "upload" if !arg.is_empty() => Self::Upload(PathBuf::from(unquote(arg))),
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

fn unquote(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| arg.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(arg)
}
