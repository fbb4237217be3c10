//! Document chunking ahead of embedding generation.
//!
//! Splitting itself is delegated to the `text-splitter` crate's recursive
//! character splitter; this module owns parameter validation, trimming,
//! and deterministic chunk id assignment.

use crate::types::{AppError, Result};
use std::collections::HashMap;
use text_splitter::{Characters, ChunkConfig, TextSplitter};

/// Chunks produced from `(source, message)` corpus records.
///
/// `ids` and `texts` are parallel, index-aligned sequences; `sources` maps
/// each chunk id back to the record it came from.
#[derive(Debug, Default)]
pub struct EmailChunks {
    /// Deterministic chunk ids, `"<source>::chunk-<n>"` in emission order.
    pub ids: Vec<String>,
    /// Trimmed chunk texts, parallel to `ids`.
    pub texts: Vec<String>,
    /// Chunk id to source record mapping.
    pub sources: HashMap<String, String>,
}

/// Splits documents into overlapping, bounded-size segments.
#[derive(Debug)]
pub struct DocumentChunker {
    chunk_size: usize,
    overlap: usize,
    splitter: TextSplitter<Characters>,
}

impl DocumentChunker {
    /// Create a chunker, failing fast on an invalid parameter combination.
    ///
    /// Requires `chunk_size > 0` and `overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Configuration(
                "chunk_size must be a positive integer".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(AppError::Configuration(format!(
                "overlap ({}) must be smaller than chunk_size ({}) to avoid loops",
                overlap, chunk_size
            )));
        }

        let config = ChunkConfig::new(chunk_size)
            .with_overlap(overlap)
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        Ok(Self {
            chunk_size,
            overlap,
            splitter: TextSplitter::new(config),
        })
    }

    /// Configured maximum chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split documents into trimmed, non-empty chunks.
    ///
    /// Empty input documents are skipped silently; whitespace-only segments
    /// are dropped after trimming.
    pub fn chunk(&self, documents: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();

        for document in documents {
            if document.is_empty() {
                continue;
            }
            chunks.extend(
                self.splitter
                    .chunks(document)
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string),
            );
        }

        chunks
    }

    /// Chunk `(source, message)` pairs into id-tagged snippets.
    ///
    /// Records with empty or whitespace-only messages contribute zero chunks.
    /// Within each record, chunk indices start at 0 in emission order.
    pub fn chunk_email_records(&self, records: &[(String, String)]) -> EmailChunks {
        let mut out = EmailChunks::default();

        for (source, message) in records {
            let text = message.trim();
            if text.is_empty() {
                continue;
            }
            for (index, chunk) in self.chunk(&[text.to_string()]).into_iter().enumerate() {
                let chunk_id = format!("{}::chunk-{}", source, index);
                out.sources.insert(chunk_id.clone(), source.clone());
                out.ids.push(chunk_id);
                out.texts.push(chunk);
            }
        }

        out
    }
}
