//! RAGMILL server binary.
//!
//! Resolves configuration from the environment, wires the application
//! state, and serves the HTTP API.

use anyhow::Context;
use ragmill::{
    api::create_router,
    db::{ConversationStore, VectorStore},
    llm::{ChatAgent, OllamaChatClient},
    rag::OllamaEmbeddingClient,
    AppState, Config,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ragmill=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env().context("failed to resolve configuration")?);

    let conversations = Arc::new(
        ConversationStore::new(&config.rag.conversations_dir)
            .context("failed to open conversation store")?,
    );
    let chat_client = Arc::new(OllamaChatClient::new(
        &config.ollama.base_url,
        &config.ollama.model,
    ));
    let agent = Arc::new(ChatAgent::new(chat_client, conversations.clone()));
    let embedder = Arc::new(OllamaEmbeddingClient::new(
        &config.ollama.base_url,
        &config.ollama.model,
    ));

    let mut vector_store = VectorStore::new(
        config.rag.vector_dimension,
        config.rag.vector_index_path.clone(),
    );
    vector_store
        .initialize()
        .context("failed to initialize vector store")?;
    tracing::info!(
        dimension = config.rag.vector_dimension,
        status = ?vector_store.status(),
        vectors = vector_store.len(),
        "vector store ready"
    );

    let state = AppState {
        config: config.clone(),
        conversations,
        agent,
        embedder,
        vector_store: Arc::new(tokio::sync::Mutex::new(vector_store)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("ragmill-server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server shutdown")?;
    Ok(())
}
