//! Core types for docrag.
//!
//! Shared data structures used across the pipeline:
//!
//! - [`DocumentText`]: text extracted from one (document, page) unit
//! - [`ChunkMetadata`]: provenance of a single chunk
//! - [`ContextHit`]: a retrieved chunk with its distance to the query
//! - [`ChunkConfig`]: chunker configuration
//!
//! All corpus entities are created during construction and live unchanged
//! for the process lifetime; nothing here is mutated after the index is
//! built.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default chunk size in words.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Text extracted from one (document, page) unit.
///
/// Paginated formats (PDF) produce one record per page with `page` set to
/// the 1-based page number; unpaginated formats (DOCX, TXT) produce a single
/// record per file with `page` absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    /// Source file name (not the full path)
    pub file_name: String,
    /// 1-based page number, present only for paginated formats
    pub page: Option<u32>,
    /// Extracted text of this unit
    pub text: String,
}

impl DocumentText {
    /// Create a record for an unpaginated document.
    #[must_use]
    pub fn whole_file(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page: None,
            text: text.into(),
        }
    }

    /// Create a record for a single page of a paginated document.
    #[must_use]
    pub fn page(file_name: impl Into<String>, page: u32, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page: Some(page),
            text: text.into(),
        }
    }
}

/// Provenance of a single chunk.
///
/// Aligned 1:1 by position with the chunk list: `metadata[i]` describes
/// `chunks[i]`. `chunk_index` is the chunk's ordinal within its source
/// (document, page) record, 0-based, restarting for every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source file name
    pub file_name: String,
    /// 1-based page number, if the source format is paginated
    pub page: Option<u32>,
    /// Ordinal of this chunk within its (document, page) record
    pub chunk_index: usize,
}

/// A retrieved chunk paired with its provenance.
///
/// Returned by `get_context` in nearest-first order; `distance` is the
/// squared Euclidean distance between the query embedding and the chunk
/// embedding.
#[derive(Debug, Clone, Serialize)]
pub struct ContextHit {
    /// Chunk text
    pub text: String,
    /// Where the chunk came from
    pub metadata: ChunkMetadata,
    /// Squared L2 distance to the query
    pub distance: f32,
}

/// Configuration for word-window chunking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum chunk size in whitespace-separated words
    pub chunk_size: usize,
}

impl ChunkConfig {
    /// Create a config, rejecting a zero window.
    pub fn new(chunk_size: usize) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Config(
                "chunk size must be at least 1 word".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
