//! # docrag-chunk
//!
//! Deterministic word-window chunking for the docrag pipeline.
//!
//! Each [`DocumentText`](docrag_core::DocumentText) record is split on
//! whitespace into words (punctuation stays attached to its token) and
//! partitioned into consecutive, non-overlapping windows of at most
//! `chunk_size` words. The window's words are rejoined with single spaces to
//! form the chunk text.
//!
//! Chunking is intentionally unaware of sentence or semantic boundaries: a
//! window may split mid-sentence. That behavior is part of the retrieval
//! contract: changing it changes embedding quality and result ordering.
//!
//! The chunker's output is a pair of equal-length lists: chunk texts and
//! [`ChunkMetadata`](docrag_core::ChunkMetadata), aligned by position.
//! `chunk_index` counts windows within one (document, page) record and
//! restarts for every record.

pub mod words;

pub use words::{ChunkOutput, WordChunker};
