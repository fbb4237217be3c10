//! Stateful-by-replay chat agent.
//!
//! The agent itself holds no conversation state: each turn reconstructs the
//! full transcript from the conversation store, sends it to the chat
//! service in one request, and persists both sides of the exchange.

use crate::db::{ConversationStore, StoredMessage};
use crate::llm::client::ChatClient;
use crate::types::{MessageRole, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// History-replay wrapper around an external chat-completion service.
pub struct ChatAgent {
    client: Arc<dyn ChatClient>,
    store: Arc<ConversationStore>,
}

impl ChatAgent {
    pub fn new(client: Arc<dyn ChatClient>, store: Arc<ConversationStore>) -> Self {
        Self { client, store }
    }

    /// Run one chat turn, persisting conversational context to the store.
    ///
    /// The stored history is replayed in order, optionally seeded with
    /// `system_prompt` if no system message has ever been recorded for this
    /// chat id, then the new prompt is appended and the whole transcript is
    /// sent in a single request. Both the prompt and the reply are persisted
    /// with independent timestamps; the reply's metadata is additionally
    /// tagged with the model identifier.
    pub async fn chat(
        &self,
        chat_id: &str,
        prompt: &str,
        system_prompt: Option<&str>,
        metadata: Option<BTreeMap<String, String>>,
    ) -> Result<String> {
        let mut transcript = self.build_history(chat_id, system_prompt)?;
        transcript.push((MessageRole::User.as_str().to_string(), prompt.to_string()));

        debug!(chat_id, turns = transcript.len(), "replaying transcript");
        let response_text = self.client.generate_with_history(&transcript).await?;

        let meta = metadata.unwrap_or_default();
        self.store.append(&StoredMessage {
            chat_id: chat_id.to_string(),
            role: MessageRole::User,
            content: prompt.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            metadata: meta.clone(),
        })?;

        let mut reply_meta = meta;
        reply_meta.insert("model".to_string(), self.client.model_name().to_string());
        self.store.append(&StoredMessage {
            chat_id: chat_id.to_string(),
            role: MessageRole::Assistant,
            content: response_text.clone(),
            timestamp: Utc::now().to_rfc3339(),
            metadata: reply_meta,
        })?;

        Ok(response_text)
    }

    /// Persisted message history for the given chat.
    pub fn load_history(&self, chat_id: &str) -> Result<Vec<StoredMessage>> {
        self.store.load(chat_id)
    }

    fn build_history(
        &self,
        chat_id: &str,
        system_prompt: Option<&str>,
    ) -> Result<Vec<(String, String)>> {
        let stored = self.store.load(chat_id)?;
        let mut transcript = Vec::with_capacity(stored.len() + 2);

        // One-time seed: only when no system message was ever recorded.
        if let Some(system) = system_prompt {
            let has_system = stored.iter().any(|m| m.role == MessageRole::System);
            if !has_system {
                transcript.push((
                    MessageRole::System.as_str().to_string(),
                    system.to_string(),
                ));
            }
        }

        for message in stored {
            transcript.push((message.role.as_str().to_string(), message.content));
        }

        Ok(transcript)
    }
}
