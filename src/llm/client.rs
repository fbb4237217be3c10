//! Chat-completion client abstraction.

use crate::types::Result;
use async_trait::async_trait;

/// Capability interface over an external chat-completion service.
///
/// Implementations send one request per call with the full ordered
/// transcript; no retry, backoff, or timeout is applied here. Callers
/// needing bounded latency wrap the call externally.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send an ordered `(role, content)` transcript, returning the reply text.
    ///
    /// Roles are the wire names `system`, `user`, `assistant`.
    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String>;

    /// Identifier of the chat model in use.
    fn model_name(&self) -> &str;
}
