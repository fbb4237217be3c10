//! Vector store persistence and recovery tests.

use ragmill::db::{StoreStatus, VectorStore};
use ragmill::types::AppError;
use std::fs;
use std::path::Path;

fn index_path(dir: &Path) -> std::path::PathBuf {
    dir.join("vectors/index.json")
}

fn ids_path(dir: &Path) -> std::path::PathBuf {
    dir.join("vectors/index.json.ids.json")
}

fn populated(dir: &Path) -> VectorStore {
    let mut store = VectorStore::new(3, Some(index_path(dir)));
    store.initialize().unwrap();
    store
        .add_embeddings(&[
            ("doc-a".to_string(), vec![1.0, 0.0, 0.0]),
            ("doc-b".to_string(), vec![0.0, 1.0, 0.0]),
        ])
        .unwrap();
    store
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    let status = restored.initialize().unwrap();

    assert_eq!(status, StoreStatus::Restored);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.document_ids(), ["doc-a", "doc-b"]);

    let results = restored.query(&[1.0, 0.0, 0.0], 1).unwrap();
    assert_eq!(results[0].0, "doc-a");
}

#[test]
fn initialize_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    assert_eq!(restored.initialize().unwrap(), StoreStatus::Restored);
    assert_eq!(restored.initialize().unwrap(), StoreStatus::Restored);
    assert_eq!(restored.document_ids(), ["doc-a", "doc-b"]);
}

#[test]
fn corrupt_index_blob_falls_back_to_fresh() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());
    fs::write(index_path(dir.path()), "not json at all").unwrap();

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    let status = restored.initialize().unwrap();

    assert_eq!(status, StoreStatus::Fresh);
    assert!(restored.is_empty());
    assert!(restored.query(&[0.0; 3], 1).unwrap().is_empty());
}

#[test]
fn dimension_mismatch_on_restore_falls_back_to_fresh() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());

    let mut restored = VectorStore::new(5, Some(index_path(dir.path())));
    let status = restored.initialize().unwrap();

    assert_eq!(status, StoreStatus::Fresh);
    assert!(restored.is_empty());
}

#[test]
fn missing_id_sidecar_degrades_the_store() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());
    fs::remove_file(ids_path(dir.path())).unwrap();

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    let status = restored.initialize().unwrap();

    assert_eq!(status, StoreStatus::Degraded);

    let query_err = restored.query(&[0.0; 3], 1).unwrap_err();
    assert!(matches!(query_err, AppError::Internal(_)));

    let add_err = restored
        .add_embeddings(&[("doc-c".to_string(), vec![0.0; 3])])
        .unwrap_err();
    assert!(matches!(add_err, AppError::Internal(_)));
}

#[test]
fn truncated_id_sidecar_degrades_the_store() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());
    fs::write(ids_path(dir.path()), r#"["doc-a"]"#).unwrap();

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    assert_eq!(restored.initialize().unwrap(), StoreStatus::Degraded);
}

#[test]
fn reset_clears_a_degraded_store() {
    let dir = tempfile::tempdir().unwrap();
    populated(dir.path());
    fs::remove_file(ids_path(dir.path())).unwrap();

    let mut restored = VectorStore::new(3, Some(index_path(dir.path())));
    restored.initialize().unwrap();
    restored.reset();

    assert_eq!(restored.status(), StoreStatus::Fresh);
    restored
        .add_embeddings(&[("doc-new".to_string(), vec![0.5, 0.5, 0.5])])
        .unwrap();
    let results = restored.query(&[0.5, 0.5, 0.5], 1).unwrap();
    assert_eq!(results[0].0, "doc-new");
}

#[test]
fn rejected_batch_does_not_touch_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = populated(dir.path());
    let ids_before = fs::read_to_string(ids_path(dir.path())).unwrap();

    let err = store
        .add_embeddings(&[("doc-bad".to_string(), vec![1.0, 2.0])])
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(fs::read_to_string(ids_path(dir.path())).unwrap(), ids_before);
    assert_eq!(store.len(), 2);
}

#[test]
fn failed_blob_write_rolls_the_batch_back() {
    let dir = tempfile::tempdir().unwrap();
    // A plain file where the index expects a parent directory makes the
    // blob write fail.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let mut store = VectorStore::new(3, Some(blocker.join("index.json")));
    store.initialize().unwrap();

    let err = store
        .add_embeddings(&[("doc-a".to_string(), vec![1.0, 0.0, 0.0])])
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(store.is_empty());
    assert!(store.document_ids().is_empty());
    assert!(store.query(&[1.0, 0.0, 0.0], 1).unwrap().is_empty());
}

#[test]
fn store_without_a_path_is_memory_only() {
    let mut store = VectorStore::new(3, None);
    assert_eq!(store.initialize().unwrap(), StoreStatus::Fresh);
    store
        .add_embeddings(&[("doc".to_string(), vec![0.0; 3])])
        .unwrap();
    assert_eq!(store.len(), 1);
}
