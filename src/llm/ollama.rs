//! Ollama chat-completion client.

use crate::llm::client::ChatClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ChatApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatApiMessage<'a>>,
    stream: bool,
}

/// [`ChatClient`] backed by an Ollama server's `/api/chat` endpoint.
pub struct OllamaChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaChatClient {
    /// Create a client for the given base URL (e.g. `http://ollama:11434`).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Pull the assistant reply out of a chat response body.
    ///
    /// If the body does not carry the expected `message.content` string, the
    /// whole body is stringified wholesale rather than dropped.
    fn extract_reply(body: Value) -> String {
        match body.get("message").and_then(|m| m.get("content")) {
            Some(Value::String(content)) => content.clone(),
            _ => body.to_string(),
        }
    }
}

#[async_trait]
impl ChatClient for OllamaChatClient {
    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatApiRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|(role, content)| ChatApiMessage {
                    role: role.as_str(),
                    content: content.as_str(),
                })
                .collect(),
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AppError::DependencyUnavailable(format!(
                        "chat service unreachable at {}: {}",
                        url, e
                    ))
                } else {
                    AppError::Llm(format!("chat request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::Llm(format!(
                "chat service returned {} for model '{}'",
                response.status(),
                self.model
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("malformed chat response: {}", e)))?;

        Ok(Self::extract_reply(body))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
