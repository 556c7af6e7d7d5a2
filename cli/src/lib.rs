//! Terminal front end for pagechat.
//!
//! The binary is a thin REPL over [`pagechat_core::ChatController`]; input parsing and output
//! formatting live here so they can be tested without a terminal.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=xxx cargo run -p pagechat-cli -- --pdf report.pdf
//! ```

pub mod backend;
pub mod command;
pub mod render;
pub mod session;

pub use backend::{API_KEY_ENV, BackendOptions};
pub use command::{Command, HELP};
