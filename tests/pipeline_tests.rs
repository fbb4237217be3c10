//! End-to-end embedding pipeline tests over a temp corpus directory.

mod common;

use common::mocks::MockEmbeddingClient;
use common::{write_corpus, TEST_DIMENSION};
use ragmill::rag::pipeline::{read_corpus, EmbeddingRecord};
use ragmill::rag::{EmbeddingGenerator, EmbeddingPipeline};
use ragmill::types::AppError;
use std::fs;
use std::sync::Arc;

fn pipeline() -> EmbeddingPipeline {
    let generator = EmbeddingGenerator::new(Arc::new(MockEmbeddingClient::new(TEST_DIMENSION)));
    EmbeddingPipeline::new(generator)
}

#[tokio::test]
async fn corpus_is_chunked_embedded_and_written_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let body = "Hello world. ".repeat(100);
    let corpus = write_corpus(dir.path(), "emails.csv", &[("msg1", &body)]);
    let output = dir.path().join("outputs/embeddings.jsonl");

    let report = pipeline().run(&corpus, &output, 50, 10).await.unwrap();

    assert!(report.embedded_chunks > 1);

    let contents = fs::read_to_string(&output).unwrap();
    let records: Vec<EmbeddingRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), report.embedded_chunks);
    for (n, record) in records.iter().enumerate() {
        assert_eq!(record.chunk_id, format!("msg1::chunk-{}", n));
        assert_eq!(record.source_file, "msg1");
        assert_eq!(record.embedding.len(), TEST_DIMENSION);
    }
}

#[tokio::test]
async fn blank_records_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(
        dir.path(),
        "emails.csv",
        &[("msg1", "a short note"), ("msg2", "   "), ("msg3", "more text")],
    );
    let output = dir.path().join("embeddings.jsonl");

    let report = pipeline().run(&corpus, &output, 50, 10).await.unwrap();

    assert_eq!(report.embedded_chunks, 2);
    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains("msg1::chunk-0"));
    assert!(contents.contains("msg3::chunk-0"));
    assert!(!contents.contains("msg2"));
}

#[tokio::test]
async fn missing_corpus_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("data/absent.csv");
    let output = dir.path().join("embeddings.jsonl");

    let err = pipeline().run(&corpus, &output, 50, 10).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("absent.csv"));
    assert!(!output.exists());
}

#[tokio::test]
async fn invalid_chunk_parameters_fail_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path(), "emails.csv", &[("msg1", "text")]);
    let output = dir.path().join("embeddings.jsonl");

    let err = pipeline().run(&corpus, &output, 50, 50).await.unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn embedding_failure_leaves_no_partial_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path(), "emails.csv", &[("msg1", "some text here")]);
    let output = dir.path().join("embeddings.jsonl");

    let generator = EmbeddingGenerator::new(Arc::new(MockEmbeddingClient::failing()));
    let err = EmbeddingPipeline::new(generator)
        .run(&corpus, &output, 50, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Llm(_)));
    assert!(!output.exists());
}

#[test]
fn read_corpus_requires_both_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "file,body\nmsg1,hello\n").unwrap();

    let err = read_corpus(&path).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("message"));
}

#[test]
fn read_corpus_handles_quoted_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quoted.csv");
    fs::write(
        &path,
        "file,message\nmsg1,\"Hello, world. With a comma.\"\n",
    )
    .unwrap();

    let records = read_corpus(&path).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file, "msg1");
    assert_eq!(records[0].message, "Hello, world. With a comma.");
}

#[test]
fn read_corpus_ignores_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.csv");
    fs::write(
        &path,
        "date,file,message,folder\n2001-05-01,msg1,hello there,inbox\n",
    )
    .unwrap();

    let records = read_corpus(&path).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file, "msg1");
    assert_eq!(records[0].message, "hello there");
}

#[tokio::test]
async fn rerun_overwrites_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path(), "emails.csv", &[("msg1", "first body")]);
    let output = dir.path().join("embeddings.jsonl");

    pipeline().run(&corpus, &output, 50, 10).await.unwrap();
    let first = fs::read_to_string(&output).unwrap();

    write_corpus(dir.path(), "emails.csv", &[("msg9", "second body")]);
    pipeline().run(&corpus, &output, 50, 10).await.unwrap();
    let second = fs::read_to_string(&output).unwrap();

    assert!(first.contains("msg1::chunk-0"));
    assert!(second.contains("msg9::chunk-0"));
    assert!(!second.contains("msg1"));
}
