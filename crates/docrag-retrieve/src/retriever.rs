//! The context retriever.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use docrag_chunk::WordChunker;
use docrag_core::{
    ChunkConfig, ChunkMetadata, ContextHit, Error, IndexBuildError, Result, TextEncoder,
};
use docrag_extract::DirectoryLoader;
use docrag_index::FlatIndex;

/// Configuration for corpus construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrieverConfig {
    /// Word-window size for chunking
    pub chunking: ChunkConfig,
}

/// One immutable, searchable corpus over a document directory.
///
/// Built once at startup; queried arbitrarily often afterwards. Chunks,
/// metadata, and index vectors are aligned by position throughout.
pub struct ContextRetriever {
    chunks: Vec<String>,
    metadata: Vec<ChunkMetadata>,
    index: FlatIndex,
    encoder: Arc<dyn TextEncoder>,
    skipped: Vec<String>,
}

impl std::fmt::Debug for ContextRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextRetriever")
            .field("chunks", &self.chunks)
            .field("metadata", &self.metadata)
            .field("index", &self.index)
            .field("encoder", &self.encoder.model_name())
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl ContextRetriever {
    /// Build a corpus from every supported file in `dir`.
    ///
    /// Runs the full pipeline synchronously: load, chunk, encode, index.
    /// Any failure aborts the build; a corpus is never partially usable.
    pub fn build(
        dir: &Path,
        encoder: Arc<dyn TextEncoder>,
        config: RetrieverConfig,
    ) -> Result<Self> {
        info!("building corpus from {:?}", dir);

        let loaded = DirectoryLoader::new().load(dir).map_err(Error::Load)?;
        debug!(
            "loaded {} records ({} files skipped)",
            loaded.documents.len(),
            loaded.skipped.len()
        );

        let chunker = WordChunker::new(config.chunking);
        let output = chunker.chunk_documents(&loaded.documents);
        debug!("chunked into {} chunks", output.chunks.len());

        let texts: Vec<&str> = output.chunks.iter().map(String::as_str).collect();
        let embeddings = encoder.encode(&texts).map_err(Error::Encode)?;
        if embeddings.len() != output.chunks.len() {
            return Err(Error::IndexBuild(IndexBuildError::Incomplete {
                chunks: output.chunks.len(),
                embeddings: embeddings.len(),
            }));
        }

        let index = FlatIndex::build(embeddings).map_err(Error::IndexBuild)?;
        info!(
            "corpus ready: {} chunks, dimension {}",
            index.len(),
            index.dimension()
        );

        Ok(Self {
            chunks: output.chunks,
            metadata: output.metadata,
            index,
            encoder,
            skipped: loaded.skipped,
        })
    }

    /// Retrieve the `k` chunks nearest to `question`, nearest first.
    ///
    /// Raw nearest-neighbor order is the final order: no filtering,
    /// re-ranking, or deduplication. An empty corpus yields an empty result;
    /// `k == 0` is a caller error.
    pub fn get_context(&self, question: &str, k: usize) -> Result<Vec<ContextHit>> {
        let query = self.encoder.encode_query(question).map_err(Error::Encode)?;
        let neighbors = self.index.search(&query, k).map_err(Error::Query)?;

        Ok(neighbors
            .into_iter()
            .map(|n| ContextHit {
                text: self.chunks[n.index].clone(),
                metadata: self.metadata[n.index].clone(),
                distance: n.distance,
            })
            .collect())
    }

    /// Number of chunks in the corpus.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Embedding dimension of the corpus (0 if empty).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// File names that were present but not supported, in load order.
    #[must_use]
    pub fn skipped_files(&self) -> &[String] {
        &self.skipped
    }

    /// Name of the encoder model backing this corpus.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.encoder.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_core::EncodeError;

    /// Encoder that returns one vector fewer than asked, to exercise the
    /// incomplete-embedding guard.
    struct ShortEncoder;

    impl TextEncoder for ShortEncoder {
        fn model_name(&self) -> &str {
            "short"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn encode(&self, texts: &[&str]) -> std::result::Result<Vec<Vec<f32>>, EncodeError> {
            Ok(texts.iter().skip(1).map(|_| vec![0.0, 0.0]).collect())
        }
    }

    #[test]
    fn test_incomplete_embeddings_fail_build() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "some words here").unwrap();

        let err = ContextRetriever::build(
            dir.path(),
            Arc::new(ShortEncoder),
            RetrieverConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::IndexBuild(IndexBuildError::Incomplete { .. })
        ));
    }
}
