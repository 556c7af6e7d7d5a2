//! Chat with a language model about a PDF from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! GEMINI_API_KEY=xxx cargo run -p pagechat-cli
//!
//! # Load a document up front
//! cargo run -p pagechat-cli -- --pdf report.pdf
//!
//! # Headless mode (single question, useful for scripting)
//! cargo run -p pagechat-cli -- --pdf report.pdf --prompt "Summarize this" --quiet
//!
//! # Through a proxy, with the key in a header
//! cargo run -p pagechat-cli -- --base-url http://localhost:8080/v1beta --header-auth
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use pagechat_cli::{BackendOptions, Command, HELP, render, session};
use pagechat_core::{ChatController, SendError};
use pagechat_gemini::GeminiBackend;
use pagechat_pdf::PdfExtractor;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type Chat = ChatController<GeminiBackend, PdfExtractor>;

/// Chat with Gemini about a PDF document.
#[derive(Parser, Debug)]
#[command(name = "pagechat", version, about)]
struct Args {
    /// Model to use.
    #[arg(short, long)]
    model: Option<String>,

    /// Custom API base URL (proxies, local mocks).
    #[arg(short, long)]
    base_url: Option<String>,

    /// Send the API key in the `x-goog-api-key` header instead of the URL.
    #[arg(long)]
    header_auth: bool,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// PDF to upload before the first message.
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Single prompt to run (headless mode). Runs one exchange and exits.
    #[arg(long)]
    prompt: Option<String>,

    /// Quiet mode. Only output the reply (useful with --prompt for scripting).
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            header_auth: self.header_auth,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = args.backend_options();
    let chat = ChatController::new(options.from_env()?, pagechat_pdf::extractor());

    if !args.quiet {
        println!("pagechat");
        println!("Model: {}", options.model());
        if args.prompt.is_none() {
            println!("{HELP}");
        }
        println!();
    }

    if let Some(ref path) = args.pdf {
        match session::upload(&chat, path).await {
            Ok(name) if !args.quiet => println!("{}", render::uploaded(&name)),
            Ok(_) => {}
            Err(error) => eprintln!("{}", render::upload_failed(&error)),
        }
    }

    if let Some(ref prompt) = args.prompt {
        return run_headless(&chat, prompt, args.quiet).await;
    }

    run_repl(&chat).await
}

/// Run a single prompt and exit (headless mode).
async fn run_headless(chat: &Chat, prompt: &str, quiet: bool) -> Result<()> {
    if !quiet {
        println!("{}", render::typing());
    }
    match chat.send(prompt).await {
        Ok(turn) => {
            println!("{}", turn.display_text());
            Ok(())
        }
        Err(SendError::Empty) => bail!("prompt is empty"),
        Err(e) => Err(e.into()),
    }
}

async fn run_repl(chat: &Chat) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::History => {
                let state = chat.snapshot();
                println!("{}", render::history(state.turns(), state.last_document_label()));
            }
            Command::Upload(path) => {
                println!("{}", session::upload_and_report(chat, &path).await);
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {cmd}");
                println!("{HELP}");
            }
            Command::Message(text) => {
                println!("{}", render::typing());
                match chat.send(&text).await {
                    Ok(turn) => println!("{}\n", render::turn(&turn)),
                    Err(SendError::Empty) => {}
                    Err(e) => println!("\x1b[31mError: {e}\x1b[0m"),
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
