//! Integration tests for the full retrieval pipeline.
//!
//! Tests the complete flow: load → chunk → encode → index → search, using
//! the deterministic hash encoder so no model download is needed.

use std::sync::Arc;

use docrag_core::{ChunkConfig, Error, LoadError, QueryError};
use docrag_embed::HashedEncoder;
use docrag_retrieve::{ContextRetriever, RetrieverConfig};
use tempfile::tempdir;

fn words(n: usize) -> String {
    (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

fn build(dir: &std::path::Path, chunk_size: usize) -> ContextRetriever {
    let config = RetrieverConfig {
        chunking: ChunkConfig::new(chunk_size).unwrap(),
    };
    ContextRetriever::build(dir, Arc::new(HashedEncoder::new()), config).unwrap()
}

#[test]
fn test_end_to_end_600_word_file() {
    let dir = tempdir().unwrap();
    let text = words(600);
    std::fs::write(dir.path().join("long.txt"), &text).unwrap();

    let retriever = build(dir.path(), 256);

    // 600 words at chunk size 256 → 3 chunks of 256, 256, 88 words.
    assert_eq!(retriever.chunk_count(), 3);
    assert_eq!(retriever.dimension(), 384);

    // Query with text identical to chunk 1's content: nearest hit must be
    // chunk 1 at distance zero.
    let all_words: Vec<&str> = text.split_whitespace().collect();
    let chunk1_text = all_words[256..512].join(" ");

    let hits = retriever.get_context(&chunk1_text, 1).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, chunk1_text);
    assert_eq!(hits[0].metadata.file_name, "long.txt");
    assert_eq!(hits[0].metadata.page, None);
    assert_eq!(hits[0].metadata.chunk_index, 1);
    assert_eq!(hits[0].distance, 0.0);
}

#[test]
fn test_chunk_metadata_sequence_for_600_word_file() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("long.txt"), words(600)).unwrap();

    let retriever = build(dir.path(), 256);

    // Retrieving the whole corpus shows all three chunk indices, each
    // pointing back at the one source file.
    let hits = retriever.get_context("anything", 100).unwrap();
    assert_eq!(hits.len(), 3);

    let mut indices: Vec<usize> = hits.iter().map(|h| h.metadata.chunk_index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(hits.iter().all(|h| h.metadata.file_name == "long.txt"));
    assert!(hits.iter().all(|h| h.metadata.page.is_none()));
}

#[test]
fn test_unsupported_files_are_excluded() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("keep.txt"), "alpha beta gamma").unwrap();
    std::fs::write(dir.path().join("drop.csv"), "a,b,c\n1,2,3").unwrap();

    let retriever = build(dir.path(), 256);

    assert_eq!(retriever.chunk_count(), 1);
    assert_eq!(retriever.skipped_files(), &["drop.csv".to_string()]);

    let hits = retriever.get_context("alpha", 10).unwrap();
    assert!(hits.iter().all(|h| h.metadata.file_name == "keep.txt"));
}

#[test]
fn test_corrupt_pdf_fails_whole_build() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("good.txt"), "perfectly fine words").unwrap();
    std::fs::write(dir.path().join("bad.pdf"), b"not really a pdf").unwrap();

    let result = ContextRetriever::build(
        dir.path(),
        Arc::new(HashedEncoder::new()),
        RetrieverConfig::default(),
    );

    assert!(matches!(
        result.unwrap_err(),
        Error::Load(LoadError::Pdf { .. })
    ));
}

#[test]
fn test_empty_directory_builds_empty_corpus() {
    let dir = tempdir().unwrap();

    let retriever = build(dir.path(), 256);

    assert_eq!(retriever.chunk_count(), 0);
    assert_eq!(retriever.dimension(), 0);

    // Querying a legitimately empty corpus is not an error.
    let hits = retriever.get_context("anything", 3).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_zero_k_is_a_caller_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "content").unwrap();

    let retriever = build(dir.path(), 256);

    let err = retriever.get_context("content", 0).unwrap_err();
    assert!(matches!(err, Error::Query(QueryError::ZeroK)));
}

#[test]
fn test_k_saturates_at_corpus_size() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), words(20)).unwrap();

    // Chunk size 4 → 5 chunks.
    let retriever = build(dir.path(), 4);
    assert_eq!(retriever.chunk_count(), 5);

    let hits = retriever.get_context("anything at all", 100).unwrap();
    assert_eq!(hits.len(), 5);
}

#[test]
fn test_results_are_nearest_first() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), words(20)).unwrap();

    let retriever = build(dir.path(), 4);

    let hits = retriever.get_context("word4 word5 word6 word7", 5).unwrap();
    for pair in hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    // The query text equals chunk 1 verbatim, so it must come back first.
    assert_eq!(hits[0].metadata.chunk_index, 1);
    assert_eq!(hits[0].distance, 0.0);
}

#[test]
fn test_repeated_queries_are_deterministic() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), words(40)).unwrap();

    let retriever = build(dir.path(), 8);

    let first = retriever.get_context("word10 word11", 3).unwrap();
    let second = retriever.get_context("word10 word11", 3).unwrap();

    let order = |hits: &[docrag_core::ContextHit]| {
        hits.iter()
            .map(|h| (h.metadata.chunk_index, h.distance))
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&first), order(&second));
}

#[test]
fn test_multiple_files_keep_their_provenance() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("alpha.txt"), "apples and oranges").unwrap();
    std::fs::write(dir.path().join("beta.txt"), "bolts and rivets").unwrap();

    let retriever = build(dir.path(), 256);
    assert_eq!(retriever.chunk_count(), 2);

    let hits = retriever.get_context("apples and oranges", 1).unwrap();
    assert_eq!(hits[0].metadata.file_name, "alpha.txt");
    assert_eq!(hits[0].metadata.chunk_index, 0);
}
