//! Single-shot chat completion requests
//!
//! One POST per exchange, no retries. The decoded reply is passed through
//! [`normalize_reply`] before it is handed back.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ChatRequest, ChatResponse};

pub const API_KEY_ENV: &str = "CLASSCHAT_API_KEY";
pub const ENDPOINT_ENV: &str = "CLASSCHAT_ENDPOINT";

/// Credential and endpoint for the completion service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    pub api_key: String,
    /// Full URL requests are posted to
    pub endpoint: String,
}

impl EndpointConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Read both values from the environment. Missing values are left empty
    /// and only surface as a failed request.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name).unwrap_or_else(|_| {
                debug!(variable = name, "environment variable not set");
                String::new()
            })
        };
        Self::new(read(API_KEY_ENV), read(ENDPOINT_ENV))
    }
}

#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced a response body.
    Transport(reqwest::Error),

    /// The endpoint answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not a chat completion document.
    Decode(serde_json::Error),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(err) => write!(f, "request failed: {err}"),
            CompletionError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "endpoint returned {status}")
                } else {
                    write!(f, "endpoint returned {status}: {body}")
                }
            }
            CompletionError::Decode(err) => write!(f, "malformed completion response: {err}"),
        }
    }
}

impl StdError for CompletionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CompletionError::Transport(err) => Some(err),
            CompletionError::Status { .. } => None,
            CompletionError::Decode(err) => Some(err),
        }
    }
}

/// Anything that can turn a request into a normalized reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: EndpointConfig,
}

impl CompletionClient {
    pub fn new(config: EndpointConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: EndpointConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub async fn send(&self, payload: &ChatRequest) -> Result<String, CompletionError> {
        debug!(
            model = %payload.model,
            messages = payload.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CompletionError::Transport)?;

        if !status.is_success() {
            return Err(CompletionError::Status { status, body });
        }

        let decoded: ChatResponse = serde_json::from_str(&body).map_err(CompletionError::Decode)?;
        Ok(normalize_reply(decoded.first_content()))
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        self.send(request).await
    }
}

/// Cosmetic cleanup of model output before display.
///
/// - `*` and `#` are removed
/// - runs of three or more `-` are removed
/// - a line-leading `- ` becomes `• `
///
/// Two cleanups follow the removals: a `#` heading line loses the whitespace
/// the marker left in front of its text, and a line left blank by the
/// removals becomes empty. So `# Title` becomes `Title` and a `--- ` rule
/// becomes an empty line. Everything else keeps its spacing.
pub fn normalize_reply(raw: &str) -> String {
    raw.split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let filtered: String = line.chars().filter(|c| !matches!(c, '*' | '#')).collect();
    let text = remove_dash_runs(&filtered);

    if let Some(rest) = text.strip_prefix("- ") {
        return format!("• {rest}");
    }
    if text.len() != line.len() && text.trim().is_empty() {
        return String::new();
    }
    if line.starts_with('#') {
        return text.trim_start().to_string();
    }
    text
}

fn remove_dash_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for ch in text.chars() {
        if ch == '-' {
            run += 1;
            continue;
        }
        if run > 0 && run < 3 {
            out.extend(std::iter::repeat_n('-', run));
        }
        run = 0;
        out.push(ch);
    }
    if run > 0 && run < 3 {
        out.extend(std::iter::repeat_n('-', run));
    }

    out
}
