//! Chat-completion clients and the history-replay agent.

pub mod agent;
pub mod client;
pub mod ollama;

pub use agent::ChatAgent;
pub use client::ChatClient;
pub use ollama::OllamaChatClient;
