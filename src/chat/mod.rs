//! Chat completion proxy for the HAI LLM gateway
//!
//! The gateway speaks the OpenAI `/chat/completions` dialect with an extra
//! `client_to_use` routing key. Only the first choice's content is returned.

use crate::config::ChatSettings;
use crate::network::{accept_json, HttpClient};
use crate::providers::ProviderRequest;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Tuning parameters forwarded to the gateway when present
pub const PASSTHROUGH_KEYS: &[&str] = &[
    "temperature",
    "top_p",
    "max_tokens",
    "frequency_penalty",
    "repetition_penalty",
];

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HAI_BEARER_TOKEN is empty")]
    MissingToken,

    #[error("gateway returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),

    #[error("gateway request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// One chat completion call
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// OpenAI-style message list
    pub messages: Value,
    pub model: Option<String>,
    pub client_to_use: Option<String>,
    /// Extra tuning parameters merged into the payload
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(messages: Value) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Copy the whitelisted tuning keys out of `args`
    pub fn with_passthrough(mut self, args: &Map<String, Value>) -> Self {
        for key in PASSTHROUGH_KEYS {
            if let Some(value) = args.get(*key) {
                self.extra.insert(key.to_string(), value.clone());
            }
        }
        self
    }
}

/// Client for the LLM gateway
pub struct ChatClient {
    client: HttpClient,
    settings: ChatSettings,
}

impl ChatClient {
    pub fn new(client: HttpClient, settings: ChatSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    /// Send the conversation and return the assistant's reply text
    pub async fn complete(&self, request: ChatRequest) -> Result<String, ChatError> {
        let token = self
            .settings
            .bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ChatError::MissingToken)?;

        let mut payload = Map::new();
        payload.insert(
            "model".to_string(),
            Value::String(request.model.unwrap_or_else(|| self.settings.model.clone())),
        );
        payload.insert("messages".to_string(), request.messages);
        payload.insert("stream".to_string(), Value::Bool(false));
        payload.insert(
            "client_to_use".to_string(),
            Value::String(
                request
                    .client_to_use
                    .unwrap_or_else(|| self.settings.client_to_use.clone()),
            ),
        );
        payload.extend(request.extra);

        let http_request = ProviderRequest::post(self.endpoint())
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", accept_json())
            .header("X-API-KEY", &self.settings.x_api_key)
            .json(Value::Object(payload));

        let response = self
            .client
            .execute_with_timeout(http_request, self.settings.timeout())
            .await?;

        if !response.is_success() {
            return Err(ChatError::Upstream {
                status: response.status,
                body: response.text,
            });
        }

        let json: Value = serde_json::from_str(&response.text)
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;
        let content = json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| ChatError::InvalidResponse("missing choices[0].message.content".to_string()))?;

        debug!("Gateway replied with {} chars", content.chars().count());
        Ok(content.to_string())
    }
}
