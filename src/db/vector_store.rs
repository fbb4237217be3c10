//! Fixed-dimension vector store with durable persistence.
//!
//! The store wraps an append-only nearest-neighbor index behind the
//! [`VectorIndex`] seam and maintains the position-to-document-id mapping
//! in a parallel ordered list. The index blob lives at the configured path;
//! the id list lives in a `<path>.ids.json` sidecar, index-aligned.
//!
//! # Single-writer discipline
//!
//! Mutating operations take `&mut self` and the store performs no internal
//! locking. Sharing one store across tasks requires an external mutex (or
//! one store per process); concurrent writers that bypass this can corrupt
//! the id-to-position correspondence on disk. This is a required caller
//! invariant, not an internal guarantee.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Internal index position marking "no match" in search results.
const NO_MATCH: i64 = -1;

/// Seam over the nearest-neighbor index backend.
///
/// The backend owns its distance metric, traversal strategy, and on-disk
/// layout. It must be deterministic given identical inputs, exact on small
/// inputs, and monotonic by true metric distance.
pub trait VectorIndex: Send {
    /// Configured dimensionality.
    fn dimension(&self) -> usize;

    /// Number of vectors added so far.
    fn len(&self) -> usize;

    /// Whether the index holds no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append vectors; positions are assigned in insertion order.
    fn add(&mut self, vectors: &[Vec<f32>]);

    /// Drop any vectors past `len`, undoing a failed append.
    fn truncate(&mut self, len: usize);

    /// Exact nearest-neighbor search, ascending by distance.
    ///
    /// Always returns `top_k` entries; positions past the end of the index
    /// are padded with a negative no-match sentinel.
    fn search(&self, query: &[f32], top_k: usize) -> Vec<(i64, f32)>;

    /// Persist the index blob to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

/// Brute-force flat index over squared L2 distance.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Load a previously persisted index blob.
    pub fn load(path: &Path) -> Result<Self> {
        let blob = fs::read_to_string(path)?;
        let index: FlatIndex = serde_json::from_str(&blob)?;
        Ok(index)
    }

    fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn add(&mut self, vectors: &[Vec<f32>]) {
        self.vectors.extend(vectors.iter().cloned());
    }

    fn truncate(&mut self, len: usize) {
        self.vectors.truncate(len);
    }

    fn search(&self, query: &[f32], top_k: usize) -> Vec<(i64, f32)> {
        let mut scored: Vec<(i64, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (position as i64, Self::squared_l2(query, vector)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        while scored.len() < top_k {
            scored.push((NO_MATCH, f32::INFINITY));
        }
        scored
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_string(self)?;
        fs::write(path, blob)?;
        Ok(())
    }
}

/// Observable outcome of [`VectorStore::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No persisted state was usable; the store starts empty.
    Fresh,
    /// Index and id list were restored and agree.
    Restored,
    /// The index blob restored but the id sidecar did not match it.
    /// The store refuses queries and inserts until reset.
    Degraded,
}

/// Fixed-dimension flat vector store with id-aligned persistence.
pub struct VectorStore {
    dimension: usize,
    index_path: Option<PathBuf>,
    ids_path: Option<PathBuf>,
    index: Option<FlatIndex>,
    document_ids: Vec<String>,
    status: StoreStatus,
}

impl VectorStore {
    /// Create an uninitialized store for the given dimensionality.
    ///
    /// With `index_path` set, [`initialize`](Self::initialize) will attempt
    /// to restore persisted state; the id sidecar is `<path>.ids.json`.
    pub fn new(dimension: usize, index_path: Option<PathBuf>) -> Self {
        let ids_path = index_path.as_ref().map(|p| {
            let mut os = p.clone().into_os_string();
            os.push(".ids.json");
            PathBuf::from(os)
        });
        Self {
            dimension,
            index_path,
            ids_path,
            index: None,
            document_ids: Vec::new(),
            status: StoreStatus::Fresh,
        }
    }

    /// Instantiate the index, restoring persisted state when possible.
    ///
    /// Idempotent: subsequent calls return the status of the first. Any load
    /// failure (missing file, corrupt blob, dimension mismatch) falls back to
    /// a fresh empty index; that recovery is logged, not fatal. If the index
    /// restores with vectors but the id sidecar does not account for every
    /// position, the store comes up [`StoreStatus::Degraded`] and refuses to
    /// serve until [`reset`](Self::reset).
    pub fn initialize(&mut self) -> Result<StoreStatus> {
        if self.index.is_some() {
            return Ok(self.status);
        }

        let restored = match &self.index_path {
            Some(path) if path.exists() => match FlatIndex::load(path) {
                Ok(index) if index.dimension() == self.dimension => Some(index),
                Ok(index) => {
                    warn!(
                        expected = self.dimension,
                        found = index.dimension(),
                        "persisted index dimension mismatch, starting fresh"
                    );
                    None
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "index restore failed, starting fresh");
                    None
                }
            },
            _ => None,
        };

        match restored {
            Some(index) => {
                self.document_ids = self.restore_document_ids();
                if self.document_ids.len() != index.len() {
                    warn!(
                        vectors = index.len(),
                        ids = self.document_ids.len(),
                        "id sidecar does not match restored index; store is degraded"
                    );
                    self.status = StoreStatus::Degraded;
                } else {
                    debug!(vectors = index.len(), "vector store restored");
                    self.status = StoreStatus::Restored;
                }
                self.index = Some(index);
            }
            None => {
                self.index = Some(FlatIndex::new(self.dimension));
                self.document_ids = Vec::new();
                self.status = StoreStatus::Fresh;
            }
        }

        Ok(self.status)
    }

    /// Current store status.
    pub fn status(&self) -> StoreStatus {
        self.status
    }

    /// Document ids in insertion order, index-aligned.
    pub fn document_ids(&self) -> &[String] {
        &self.document_ids
    }

    /// Number of vectors currently held.
    pub fn len(&self) -> usize {
        self.index.as_ref().map(|i| i.len()).unwrap_or(0)
    }

    /// Whether the store holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard all state and start empty, clearing a degraded condition.
    pub fn reset(&mut self) {
        self.index = Some(FlatIndex::new(self.dimension));
        self.document_ids = Vec::new();
        self.status = StoreStatus::Fresh;
    }

    /// Append `(document_id, vector)` pairs and persist synchronously.
    ///
    /// Every vector is validated against the configured dimension before any
    /// is inserted; one mismatch aborts the whole batch and nothing is
    /// persisted. The index blob write is a hard error that also rolls the
    /// in-memory index back, so memory and disk stay consistent. The id
    /// sidecar write is best-effort and only logged on failure. Empty input
    /// is a no-op.
    pub fn add_embeddings(&mut self, pairs: &[(String, Vec<f32>)]) -> Result<()> {
        let index = match self.index.as_mut() {
            Some(index) => index,
            None => {
                return Err(AppError::Internal(
                    "vector store not initialized; call initialize() first".to_string(),
                ))
            }
        };
        if self.status == StoreStatus::Degraded {
            return Err(AppError::Internal(
                "vector store is degraded: position-to-id mapping was lost on restore"
                    .to_string(),
            ));
        }

        for (document_id, vector) in pairs {
            if vector.len() != self.dimension {
                return Err(AppError::Validation(format!(
                    "embedding dimension mismatch: expected {}, got {} for document {}",
                    self.dimension,
                    vector.len(),
                    document_id
                )));
            }
        }
        if pairs.is_empty() {
            return Ok(());
        }

        let vectors: Vec<Vec<f32>> = pairs.iter().map(|(_, v)| v.clone()).collect();
        let previous_len = index.len();
        index.add(&vectors);

        if let Some(path) = &self.index_path {
            if let Err(e) = index.save(path) {
                index.truncate(previous_len);
                return Err(e);
            }
        }
        self.document_ids
            .extend(pairs.iter().map(|(id, _)| id.clone()));
        self.persist_document_ids();

        Ok(())
    }

    /// Nearest-neighbor query returning up to `top_k` `(id, distance)` pairs
    /// ordered by ascending distance. No-match sentinel positions are
    /// filtered, never surfaced.
    pub fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<(String, f32)>> {
        let index = match self.index.as_ref() {
            Some(index) => index,
            None => {
                return Err(AppError::Internal(
                    "vector store not initialized; call initialize() first".to_string(),
                ))
            }
        };
        if self.status == StoreStatus::Degraded {
            return Err(AppError::Internal(
                "vector store is degraded: refusing to serve queries with a lost id mapping"
                    .to_string(),
            ));
        }
        if vector.len() != self.dimension {
            return Err(AppError::Validation(format!(
                "query dimension mismatch: expected {}, got {}",
                self.dimension,
                vector.len()
            )));
        }

        let mut results = Vec::new();
        for (position, distance) in index.search(vector, top_k) {
            if position < 0 {
                continue;
            }
            let document_id = self
                .document_ids
                .get(position as usize)
                .cloned()
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "index position {} has no document id",
                        position
                    ))
                })?;
            results.push((document_id, distance));
        }

        Ok(results)
    }

    fn restore_document_ids(&self) -> Vec<String> {
        let Some(path) = &self.ids_path else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(path)
            .map_err(AppError::from)
            .and_then(|s| serde_json::from_str::<Vec<String>>(&s).map_err(AppError::from))
        {
            Ok(ids) => ids,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "id sidecar restore failed");
                Vec::new()
            }
        }
    }

    // Best-effort: a sidecar write failure must not fail the insert.
    fn persist_document_ids(&self) {
        let Some(path) = &self.ids_path else {
            return;
        };
        let result = serde_json::to_string(&self.document_ids)
            .map_err(AppError::from)
            .and_then(|blob| fs::write(path, blob).map_err(AppError::from));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "id sidecar persistence failed");
        }
    }
}
