//! Embedding pipeline orchestrator: corpus file -> chunks -> embeddings -> artifact.

use crate::rag::chunker::DocumentChunker;
use crate::rag::embeddings::EmbeddingGenerator;
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Required corpus column naming the source of each message.
pub const FILE_COLUMN: &str = "file";
/// Required corpus column holding the free-text message body.
pub const MESSAGE_COLUMN: &str = "message";

/// One row of the email corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Source label, unique per message file.
    pub file: String,
    /// Free-text message body.
    pub message: String,
}

/// One line of the embedding output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub chunk_id: String,
    pub source_file: String,
    pub embedding: Vec<f32>,
}

/// Outcome of a pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Number of embedding records written.
    pub embedded_chunks: usize,
}

/// Read the tabular corpus, validating the two required columns by name.
///
/// A missing file is `NotFound`; missing columns are `Validation`. Values in
/// either column are taken as text verbatim.
pub fn read_corpus(path: &Path) -> Result<Vec<CorpusRecord>> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "corpus file not found at {}",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Internal(format!("failed to open corpus: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Internal(format!("failed to read corpus headers: {}", e)))?
        .clone();

    let file_idx = headers
        .iter()
        .position(|h| h == FILE_COLUMN)
        .ok_or_else(|| {
            AppError::Validation(format!("missing identifier column '{}'", FILE_COLUMN))
        })?;
    let message_idx = headers
        .iter()
        .position(|h| h == MESSAGE_COLUMN)
        .ok_or_else(|| {
            AppError::Validation(format!("missing text column '{}'", MESSAGE_COLUMN))
        })?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| AppError::Internal(format!("corpus row error: {}", e)))?;
        records.push(CorpusRecord {
            file: row.get(file_idx).unwrap_or_default().to_string(),
            message: row.get(message_idx).unwrap_or_default().to_string(),
        });
    }

    Ok(records)
}

/// Drives chunking and embedding generation over a corpus file.
pub struct EmbeddingPipeline {
    generator: EmbeddingGenerator,
}

impl EmbeddingPipeline {
    pub fn new(generator: EmbeddingGenerator) -> Self {
        Self { generator }
    }

    /// Run the full pipeline: read, chunk, embed, write the JSONL artifact.
    ///
    /// One batched embedding call is made; any failure leaves no partial
    /// output behind (the artifact is written to a temporary name and
    /// renamed into place).
    pub async fn run(
        &self,
        corpus_path: &Path,
        output_path: &Path,
        chunk_size: usize,
        overlap: usize,
    ) -> Result<PipelineReport> {
        let chunker = DocumentChunker::new(chunk_size, overlap)?;
        let records = read_corpus(corpus_path)?;
        let pairs: Vec<(String, String)> = records
            .into_iter()
            .map(|r| (r.file, r.message))
            .collect();

        let chunks = chunker.chunk_email_records(&pairs);
        let embedded = self
            .generator
            .generate_from_texts(&chunks.ids, &chunks.texts)
            .await?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = output_path.with_extension("jsonl.tmp");
        {
            let mut out = fs::File::create(&tmp_path)?;
            for (chunk_id, embedding) in &embedded {
                let source_file = chunks
                    .sources
                    .get(chunk_id)
                    .cloned()
                    .unwrap_or_default();
                let record = EmbeddingRecord {
                    chunk_id: chunk_id.clone(),
                    source_file,
                    embedding: embedding.clone(),
                };
                let line = serde_json::to_string(&record)?;
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
        }
        fs::rename(&tmp_path, output_path)?;

        info!(
            chunks = embedded.len(),
            output = %output_path.display(),
            model = self.generator.model_name(),
            "embedding pipeline completed"
        );

        Ok(PipelineReport {
            embedded_chunks: embedded.len(),
        })
    }
}
