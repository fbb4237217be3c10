//! Shared test fixtures.

pub mod mocks;

use mocks::{EchoChatClient, MockEmbeddingClient};
use ragmill::db::{ConversationStore, VectorStore};
use ragmill::llm::ChatAgent;
use ragmill::utils::config::{Config, OllamaConfig, RagConfig, ServerConfig};
use ragmill::AppState;
use std::path::Path;
use std::sync::Arc;

/// Vector dimensionality used by the mock embedding client.
#[allow(dead_code)]
pub const TEST_DIMENSION: usize = 8;

/// Configuration with every artifact path rooted under `root`.
#[allow(dead_code)]
pub fn test_config(root: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        ollama: OllamaConfig {
            model: "mock-model".to_string(),
            base_url: "http://localhost:11434".to_string(),
        },
        rag: RagConfig {
            chunk_size: 512,
            chunk_overlap: 50,
            vector_dimension: TEST_DIMENSION,
            vector_index_path: Some(root.join("index.json")),
            conversations_dir: root.join("conversations"),
            corpus_dir: root.join("data"),
            embeddings_output: root.join("outputs/embeddings.jsonl"),
            graph_output_dir: root.join("outputs/graph_rag"),
        },
    }
}

/// Application state backed entirely by mocks and `root`-local paths.
#[allow(dead_code)]
pub fn test_state(root: &Path) -> AppState {
    test_state_from(test_config(root))
}

/// Like [`test_state`], but over a caller-tuned configuration.
#[allow(dead_code)]
pub fn test_state_from(config: Config) -> AppState {
    let config = Arc::new(config);
    let conversations =
        Arc::new(ConversationStore::new(&config.rag.conversations_dir).unwrap());
    let chat_client = Arc::new(EchoChatClient::new());
    let agent = Arc::new(ChatAgent::new(chat_client, conversations.clone()));
    let embedder = Arc::new(MockEmbeddingClient::new(TEST_DIMENSION));

    let mut vector_store = VectorStore::new(
        config.rag.vector_dimension,
        config.rag.vector_index_path.clone(),
    );
    vector_store.initialize().unwrap();

    AppState {
        config,
        conversations,
        agent,
        embedder,
        vector_store: Arc::new(tokio::sync::Mutex::new(vector_store)),
    }
}

/// Write a small email corpus CSV under the state's corpus directory.
#[allow(dead_code)]
pub fn write_corpus(root: &Path, filename: &str, rows: &[(&str, &str)]) -> std::path::PathBuf {
    let data_dir = root.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    let path = data_dir.join(filename);

    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["file", "message"]).unwrap();
    for (file, message) in rows {
        writer.write_record([*file, *message]).unwrap();
    }
    writer.flush().unwrap();
    path
}
