//! Client for the generative-text API smoke test
//!
//! Sends one non-streaming `POST` to `http://host:port/api/generate` and hands
//! back the status line and the raw body. No retries.

use anyhow::Result;
use serde::Serialize;

use crate::config::GenerateConfig;

/// JSON body of a generate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    pub fn from_config(config: &'a GenerateConfig) -> Self {
        Self {
            model: &config.model,
            prompt: &config.prompt,
            stream: false,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Status and body of the endpoint's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl GenerateReply {
    /// `200 OK` style status line
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.reason)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Full URL of the endpoint
pub fn endpoint_url(config: &GenerateConfig) -> String {
    format!("http://{}:{}{}", config.host, config.port, config.path)
}

/// Send the request and wait for the whole response
#[cfg(feature = "generate-api")]
pub fn send_generate(config: &GenerateConfig) -> Result<GenerateReply> {
    use anyhow::Context;
    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;
    use std::time::Duration;

    let url = endpoint_url(config);
    let body = GenerateRequest::from_config(config).to_json()?;

    let client = Client::builder()
        .timeout(config.timeout_secs.map(Duration::from_secs))
        .build()
        .context("Failed to build HTTP client")?;

    tracing::debug!(%url, model = %config.model, "sending generate request");

    let response = client
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .with_context(|| format!("Request to {} failed", url))?;

    let status = response.status();
    let body = response
        .text()
        .with_context(|| format!("Failed to read response from {}", url))?;

    Ok(GenerateReply {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body,
    })
}

#[cfg(not(feature = "generate-api"))]
pub fn send_generate(_config: &GenerateConfig) -> Result<GenerateReply> {
    anyhow::bail!("sheetpeek-core was built without the `generate-api` feature")
}
