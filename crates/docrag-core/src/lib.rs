//! # docrag-core
//!
//! Core types and traits for docrag, a semantic retrieval layer over a
//! directory of documents.
//!
//! This crate provides the foundational abstractions used throughout docrag:
//!
//! - **Document Loading**: [`ContentExtractor`] trait for turning files into
//!   text records
//! - **Text Encoding**: [`TextEncoder`] trait for converting text to dense
//!   vector embeddings
//! - **Shared Types**: [`DocumentText`], [`ChunkMetadata`], [`ContextHit`]
//! - **Error Taxonomy**: one error enum per pipeline stage, unified by
//!   [`Error`]
//!
//! ## Architecture
//!
//! The crate is organized around a build-once pipeline:
//!
//! ```text
//! Directory → ContentExtractor → WordChunker → TextEncoder → FlatIndex
//!                                                               ↓
//!                                            question → ContextRetriever → ContextHit
//! ```
//!
//! Corpus construction runs the whole pipeline exactly once; afterwards the
//! corpus is immutable and only queried.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DocumentText`] | Text extracted from one (document, page) unit |
//! | [`ChunkMetadata`] | Source file, optional page, chunk ordinal |
//! | [`ContextHit`] | A retrieved chunk with its provenance and distance |
//! | [`ChunkConfig`] | Word-window size for the chunker |
//!
//! ## Related Crates
//!
//! - `docrag-extract`: PDF / DOCX / TXT extraction
//! - `docrag-chunk`: word-window chunking
//! - `docrag-embed`: Candle-based text encoding
//! - `docrag-index`: exact brute-force L2 search
//! - `docrag-retrieve`: corpus construction and query orchestration

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EncodeError, Error, IndexBuildError, LoadError, QueryError, Result};
pub use traits::*;
pub use types::*;
