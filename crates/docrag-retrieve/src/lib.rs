//! # docrag-retrieve
//!
//! Corpus construction and query-time retrieval for docrag.
//!
//! [`ContextRetriever`] ties the pipeline together. At construction it runs
//! loader → chunker → encoder over one directory and builds the similarity
//! index; the result is an immutable corpus that lives for the process
//! lifetime. At query time it encodes the question with the same encoder,
//! searches the index, and pairs each neighbor with its chunk text and
//! provenance.
//!
//! Construction is the only expensive step (embedding cost scales linearly
//! with chunk count) and it either completes fully or fails; there is no
//! partial corpus. Once built, the retriever holds no interior mutability
//! and can be shared freely across threads.

pub mod retriever;

pub use retriever::{ContextRetriever, RetrieverConfig};
