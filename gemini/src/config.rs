use std::{fmt, sync::Arc, time::Duration};

/// Gemini REST base URL used by the Developer API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const USER_AGENT: &str = concat!("pagechat-gemini/", env!("CARGO_PKG_VERSION"));
/// Chat model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Authentication strategy supported by the Gemini backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Attach `?key=API_KEY` to every request (default).
    #[default]
    Query,
    /// Send the API key via `x-goog-api-key` header.
    Header,
}

/// Gemini `generateContent` client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
    inner: Arc<GeminiConfig>,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend for [`DEFAULT_MODEL`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GeminiConfig {
                api_key: api_key.into(),
                base_url: GEMINI_API_BASE_URL.to_string(),
                auth: AuthMode::Query,
                model: sanitize_model(DEFAULT_MODEL),
                timeout: None,
            }),
            client: reqwest::Client::new(),
        }
    }

    /// Override the REST base URL (useful for sandboxes or proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    /// Select how the API key is transmitted.
    #[must_use]
    pub fn with_auth_mode(mut self, mode: AuthMode) -> Self {
        Arc::make_mut(&mut self.inner).auth = mode;
        self
    }

    /// Override the chat model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).model = sanitize_model(model);
        self
    }

    /// Abort requests that take longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        Arc::make_mut(&mut self.inner).timeout = Some(timeout);
        self
    }

    /// Reuse an existing HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Model name without the `models/` prefix.
    #[must_use]
    pub fn model(&self) -> &str {
        self.inner.model.trim_start_matches("models/")
    }

    /// Configured REST base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn config(&self) -> &GeminiConfig {
        &self.inner
    }

    pub(crate) const fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) auth: AuthMode,
    pub(crate) model: String,
    pub(crate) timeout: Option<Duration>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Endpoint URL without credentials; the key is attached per request.
    pub(crate) fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        )
    }

    pub(crate) fn model_endpoint(&self, action: &str) -> String {
        self.endpoint(&format!("{}:{action}", self.model))
    }
}

pub fn sanitize_model(model: impl Into<String>) -> String {
    let model = model.into();
    if model.starts_with("models/") {
        model
    } else {
        format!("models/{model}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_prefix_is_added_once() {
        assert_eq!(sanitize_model("gemini-2.0-flash"), "models/gemini-2.0-flash");
        assert_eq!(sanitize_model("models/gemini-2.0-flash"), "models/gemini-2.0-flash");
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let backend = GeminiBackend::new("k").with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            backend.config().model_endpoint("generateContent"),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn builder_does_not_touch_clones() {
        let base = GeminiBackend::new("k");
        let custom = base.clone().with_model("gemini-2.5-flash");
        assert_eq!(base.model(), "gemini-2.0-flash");
        assert_eq!(custom.model(), "gemini-2.5-flash");
    }

    #[test]
    fn debug_hides_key() {
        let backend = GeminiBackend::new("secret-key");
        assert!(!format!("{backend:?}").contains("secret-key"));
    }
}
