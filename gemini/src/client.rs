use pagechat_core::ChatRequest;
use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::{AuthMode, GeminiConfig, USER_AGENT},
    error::GeminiError,
};

pub async fn call_generate(
    client: &reqwest::Client,
    cfg: &GeminiConfig,
    request: &ChatRequest,
) -> Result<Value, GeminiError> {
    post_json(client, cfg, cfg.model_endpoint("generateContent"), request).await
}

fn debug_enabled() -> bool {
    std::env::var("PAGECHAT_GEMINI_DEBUG").as_deref() == Ok("1")
}

async fn post_json<S: Serialize + Sync>(
    client: &reqwest::Client,
    cfg: &GeminiConfig,
    endpoint: String,
    body: &S,
) -> Result<Value, GeminiError> {
    let debug = debug_enabled();
    if debug && let Ok(json) = serde_json::to_string_pretty(body) {
        debug!(%endpoint, "Gemini request:\n{json}");
    }

    let mut builder = client
        .post(&endpoint)
        .header(header::USER_AGENT, USER_AGENT)
        .json(body);
    builder = match cfg.auth {
        AuthMode::Query => builder.query(&[("key", cfg.api_key.as_str())]),
        AuthMode::Header => builder.header("x-goog-api-key", cfg.api_key.as_str()),
    };
    if let Some(timeout) = cfg.timeout {
        builder = builder.timeout(timeout);
    }

    let response = builder.send().await?;
    let status = response.status();
    let text = response.text().await?;
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(GeminiError::from_status(status.as_u16(), &text));
        }
        Err(err) => return Err(err.into()),
    };
    // A JSON error envelope is still an envelope; the caller falls back when it has no reply.
    if !status.is_success() {
        let error = GeminiError::from_status(status.as_u16(), &text);
        warn!(%endpoint, %error, "Gemini request rejected");
    }
    if debug && let Ok(json) = serde_json::to_string_pretty(&value) {
        debug!(%endpoint, "Gemini response:\n{json}");
    }
    Ok(value)
}
