//! Backend construction for the CLI.

use std::time::Duration;

use anyhow::{Result, anyhow};
use pagechat_gemini::{AuthMode, DEFAULT_MODEL, GeminiBackend};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Model name, `models/` prefix optional.
    pub model: Option<String>,
    /// Custom API base URL (proxies, local mocks).
    pub base_url: Option<String>,
    /// Send the key in the `x-goog-api-key` header instead of the query string.
    pub header_auth: bool,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl BackendOptions {
    /// Model that will be used.
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Builds a backend with the given key.
    #[must_use]
    pub fn build(&self, api_key: impl Into<String>) -> GeminiBackend {
        let mut backend = GeminiBackend::new(api_key).with_model(self.model());
        if let Some(url) = &self.base_url {
            backend = backend.with_base_url(url.as_str());
        }
        if self.header_auth {
            backend = backend.with_auth_mode(AuthMode::Header);
        }
        if let Some(timeout) = self.timeout {
            backend = backend.with_timeout(timeout);
        }
        backend
    }

    /// Builds a backend with the key from [`API_KEY_ENV`].
    pub fn from_env(&self) -> Result<GeminiBackend> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| anyhow!("Set {API_KEY_ENV} in your environment"))?;
        Ok(self.build(api_key))
    }
}
