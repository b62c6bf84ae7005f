//! services/api/src/adapters/generation_http.rs
//!
//! This module contains the adapter for the locally hosted text-generation service.
//! It implements the `CopyGenerationService` port from the `core` crate over plain
//! JSON-over-HTTP using `reqwest`.

use async_trait::async_trait;
use copy_generator_core::{
    domain::GenerationRequest,
    ports::{CopyGenerationService, PortError, PortResult, REQUEST_FAILED_MESSAGE},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Path of the structured copy endpoint, relative to the base URL.
pub const COPY_PATH: &str = "/api/ai/generate-copy/";

/// Path of the free-form prompt endpoint, relative to the base URL.
pub const PROMPT_PATH: &str = "/api/ai/generate/";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CopyGenerationService` against the generation HTTP API.
#[derive(Clone)]
pub struct HttpGenerationAdapter {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
}

impl HttpGenerationAdapter {
    /// Creates a new `HttpGenerationAdapter`.
    ///
    /// Only connecting is bounded in time; an accepted request may take as long
    /// as the model needs.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> PortResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(REQUEST_FAILED_MESSAGE);
            warn!("Generation service answered {}: {}", status, message);
            return Err(PortError::Rejected(message.to_string()));
        }

        let parsed = parsed.ok_or_else(|| {
            PortError::Protocol("The generation service did not return JSON.".to_string())
        })?;
        if let Some(warning) = parsed.get("warning").and_then(Value::as_str) {
            warn!("Generation service reported a warning: {}", warning);
        }
        Ok(parsed)
    }
}

/// Pulls the first non-blank string found under `fields` out of a response body.
fn extract_text(body: &Value, fields: &[&str]) -> PortResult<String> {
    fields
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            PortError::Protocol(format!(
                "The generation service response contained no '{}' text.",
                fields[0]
            ))
        })
}

//=========================================================================================
// `CopyGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CopyGenerationService for HttpGenerationAdapter {
    async fn generate_copy(&self, request: &GenerationRequest) -> PortResult<String> {
        let body = self.post_json(COPY_PATH, request).await?;
        extract_text(&body, &["description", "text"])
    }

    async fn generate_text(&self, prompt: &str) -> PortResult<String> {
        let body = self.post_json(PROMPT_PATH, &PromptBody { prompt }).await?;
        extract_text(&body, &["text"])
    }
}
