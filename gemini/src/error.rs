use std::fmt;

use serde::Deserialize;

/// Errors raised by the Gemini backend.
#[derive(Debug)]
pub enum GeminiError {
    /// HTTP transport errors (connect, TLS, timeout, body read).
    Http(reqwest::Error),
    /// The response body was not valid JSON.
    Json(serde_json::Error),
    /// The API answered with a non-success status and a body that is not JSON.
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error envelope, or a status description.
        message: String,
    },
}

/// Gemini API error response structure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ApiErrorResponse {
    pub fn friendly_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        error.message.clone().or_else(|| error.status.clone())
    }
}

impl GeminiError {
    /// Builds an [`GeminiError::Api`] from a failed response.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|response| response.friendly_message())
            .unwrap_or_else(|| status_message(status));
        Self::Api { status, message }
    }

    /// HTTP status of an API error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) | Self::Json(_) => None,
        }
    }

    /// Whether the server could not be reached.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http(err) if err.is_connect())
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request".to_string(),
        401 => "Authentication failed - check your API key".to_string(),
        403 => "Access denied - check your API key permissions".to_string(),
        404 => "Model not found".to_string(),
        429 => "Rate limit exceeded - please wait before retrying".to_string(),
        500 => "Server error - please try again".to_string(),
        502..=504 => "Service temporarily unavailable - please try again".to_string(),
        _ => format!("HTTP error {status}"),
    }
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{}", http_error_message(err)),
            Self::Json(err) => write!(f, "Invalid response format: {err}"),
            Self::Api { status, message } => write!(f, "{message} (HTTP {status})"),
        }
    }
}

fn http_error_message(err: &reqwest::Error) -> String {
    if err.is_connect() {
        return "Network connection failed - check your internet connection".to_string();
    }
    if err.is_timeout() {
        return "Request timed out - please try again".to_string();
    }
    err.to_string()
}

impl std::error::Error for GeminiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
