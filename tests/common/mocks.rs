//! Mock clients for testing.
//!
//! Deterministic stand-ins for the Ollama-backed chat and embedding
//! clients, shared across the integration test files.

use async_trait::async_trait;
use ragmill::llm::ChatClient;
use ragmill::rag::EmbeddingClient;
use ragmill::types::{AppError, Result};
use std::sync::Mutex;

/// Embedding client returning fixed-dimension vectors without any I/O.
pub struct MockEmbeddingClient {
    dimension: usize,
    should_fail: bool,
}

#[allow(dead_code)]
impl MockEmbeddingClient {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            dimension: 0,
            should_fail: true,
        }
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddingClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.should_fail {
            return Err(AppError::Llm("mock embedding failure".to_string()));
        }
        Ok(texts
            .iter()
            .map(|text| vec![text.len() as f32; self.dimension])
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock-embed-model"
    }
}

/// Chat client that replies with the content of the last transcript entry
/// and records every transcript it was asked to complete.
pub struct EchoChatClient {
    pub transcripts: Mutex<Vec<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl EchoChatClient {
    pub fn new() -> Self {
        Self {
            transcripts: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<Vec<(String, String)>> {
        self.transcripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for EchoChatClient {
    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        self.transcripts.lock().unwrap().push(messages.to_vec());
        messages
            .last()
            .map(|(_, content)| content.clone())
            .ok_or_else(|| AppError::Llm("empty transcript".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-chat-model"
    }
}

/// Chat client that always fails.
pub struct FailingChatClient;

#[async_trait]
impl ChatClient for FailingChatClient {
    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        Err(AppError::Llm("mock chat failure".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-chat-model"
    }
}
