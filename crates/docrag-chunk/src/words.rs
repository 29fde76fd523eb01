//! Fixed-size word-window chunking.

use docrag_core::{ChunkConfig, ChunkMetadata, DocumentText, Error};

/// Aligned chunk texts and metadata.
///
/// Invariant: `chunks.len() == metadata.len()` and `metadata[i]` describes
/// `chunks[i]`.
#[derive(Debug, Default)]
pub struct ChunkOutput {
    /// Chunk texts, corpus-wide order
    pub chunks: Vec<String>,
    /// Provenance, parallel to `chunks`
    pub metadata: Vec<ChunkMetadata>,
}

/// Splits records into non-overlapping windows of whole words.
pub struct WordChunker {
    chunk_size: usize,
}

impl WordChunker {
    /// Create a chunker from a validated config.
    #[must_use]
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
        }
    }

    /// Create a chunker with an explicit window size, rejecting zero.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self, Error> {
        Ok(Self::new(ChunkConfig::new(chunk_size)?))
    }

    /// Window size in words.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk every record, producing aligned texts and metadata.
    ///
    /// A record with no words contributes nothing, never an empty chunk.
    /// A record with W words contributes exactly `ceil(W / chunk_size)`
    /// chunks, the last possibly shorter than the window.
    #[must_use]
    pub fn chunk_documents(&self, documents: &[DocumentText]) -> ChunkOutput {
        let mut output = ChunkOutput::default();

        for document in documents {
            let words: Vec<&str> = document.text.split_whitespace().collect();

            for (chunk_index, window) in words.chunks(self.chunk_size).enumerate() {
                output.chunks.push(window.join(" "));
                output.metadata.push(ChunkMetadata {
                    file_name: document.file_name.clone(),
                    page: document.page,
                    chunk_index,
                });
            }
        }

        output
    }
}
