//! Embedding generation over an external embedding service.
//!
//! The service is reached through the [`EmbeddingClient`] capability trait
//! injected at construction; the HTTP-backed implementation talks to
//! Ollama's `/api/embed` endpoint in a single batched request.

use crate::rag::pipeline::CorpusRecord;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability interface over an embedding model service.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a batch of texts, returning one vector per input in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier of the embedding model in use.
    fn model_name(&self) -> &str;
}

// ============================================================================
// Ollama-backed client
// ============================================================================

#[derive(Debug, Serialize)]
struct EmbedApiRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedApiResponse {
    embeddings: Vec<Vec<f32>>,
}

/// [`EmbeddingClient`] backed by an Ollama server.
pub struct OllamaEmbeddingClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingClient {
    /// Create a client for the given base URL (e.g. `http://ollama:11434`).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingClient for OllamaEmbeddingClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&EmbedApiRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AppError::DependencyUnavailable(format!(
                        "embedding service unreachable at {}: {}",
                        url, e
                    ))
                } else {
                    AppError::Llm(format!("embedding request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::Llm(format!(
                "embedding service returned {} for model '{}'",
                response.status(),
                self.model
            )));
        }

        let body: EmbedApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("malformed embedding response: {}", e)))?;

        Ok(body.embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Maps batches of `(id, text)` pairs to `(id, vector)` pairs.
pub struct EmbeddingGenerator {
    client: Arc<dyn EmbeddingClient>,
}

impl EmbeddingGenerator {
    /// Wrap an injected embedding service client.
    pub fn new(client: Arc<dyn EmbeddingClient>) -> Self {
        Self { client }
    }

    /// Model identifier of the underlying client.
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Generate embeddings from parallel id and text sequences.
    ///
    /// `ids` and `texts` must be equal length. Empty input yields an empty
    /// result without touching the network. A vector-count mismatch from the
    /// service is a hard error; nothing is partially returned.
    pub async fn generate_from_texts(
        &self,
        ids: &[String],
        texts: &[String],
    ) -> Result<Vec<(String, Vec<f32>)>> {
        if ids.len() != texts.len() {
            return Err(AppError::Validation(format!(
                "identifiers and documents must have the same length ({} vs {})",
                ids.len(),
                texts.len()
            )));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.client.embed_batch(texts).await?;
        if embeddings.len() != ids.len() {
            return Err(AppError::Llm(format!(
                "embedding model returned {} vectors for {} documents",
                embeddings.len(),
                ids.len()
            )));
        }

        Ok(ids.iter().cloned().zip(embeddings).collect())
    }

    /// Tabular variant: embed whole corpus records keyed by their source label.
    ///
    /// The required-column validation happens when the corpus is read; by the
    /// time records exist both fields are guaranteed present.
    pub async fn generate(&self, records: &[CorpusRecord]) -> Result<Vec<(String, Vec<f32>)>> {
        let ids: Vec<String> = records.iter().map(|r| r.file.clone()).collect();
        let texts: Vec<String> = records.iter().map(|r| r.message.clone()).collect();
        self.generate_from_texts(&ids, &texts).await
    }
}
