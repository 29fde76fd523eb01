//! Core traits for docrag components.
//!
//! - [`ContentExtractor`]: turn a file into text records
//! - [`TextEncoder`]: turn texts into fixed-dimension dense vectors
//!
//! Both are seams where implementations can be swapped without touching the
//! chunking or index logic: extraction varies by file format, and encoding
//! varies by backend (local Candle inference, a deterministic hash encoder
//! for tests).
//!
//! The pipeline is synchronous throughout; implementations block until done.

use std::path::Path;

use crate::error::{EncodeError, LoadError};
use crate::types::DocumentText;

/// Trait for extracting text records from a file.
pub trait ContentExtractor: Send + Sync {
    /// File extensions (lower-case, without the dot) this extractor handles.
    fn extensions(&self) -> &[&str];

    /// Check whether this extractor handles the given path, by extension.
    fn can_extract(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions().contains(&ext.as_str())
            })
    }

    /// Extract text records from the file.
    ///
    /// Paginated formats return one record per page; others return a single
    /// record. An unreadable or corrupt file is a [`LoadError`]; extraction
    /// never degrades to partial output.
    fn extract(&self, path: &Path, file_name: &str) -> Result<Vec<DocumentText>, LoadError>;
}

/// Trait for encoding texts into dense vectors.
///
/// The same `encode` routine serves both corpus chunks (a batch) and an
/// incoming query (a batch of one), so corpus and query embeddings are
/// always comparable.
pub trait TextEncoder: Send + Sync {
    /// Model name/identifier.
    fn model_name(&self) -> &str;

    /// Embedding dimension.
    fn dimension(&self) -> usize;

    /// Encode texts into one vector per input, in input order.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncodeError>;

    /// Encode a single query text.
    fn encode_query(&self, query: &str) -> Result<Vec<f32>, EncodeError> {
        let mut vectors = self.encode(&[query])?;
        vectors
            .pop()
            .ok_or_else(|| EncodeError::Inference("empty encoding result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FakeExtractor;

    impl ContentExtractor for FakeExtractor {
        fn extensions(&self) -> &[&str] {
            &["txt"]
        }

        fn extract(
            &self,
            _path: &Path,
            file_name: &str,
        ) -> Result<Vec<DocumentText>, LoadError> {
            Ok(vec![DocumentText::whole_file(file_name, "text")])
        }
    }

    #[test]
    fn test_can_extract_matches_extension() {
        let extractor = FakeExtractor;
        assert!(extractor.can_extract(&PathBuf::from("/docs/a.txt")));
        assert!(!extractor.can_extract(&PathBuf::from("/docs/a.csv")));
    }

    #[test]
    fn test_can_extract_is_case_insensitive() {
        let extractor = FakeExtractor;
        assert!(extractor.can_extract(&PathBuf::from("/docs/A.TXT")));
    }

    #[test]
    fn test_can_extract_requires_extension() {
        let extractor = FakeExtractor;
        assert!(!extractor.can_extract(&PathBuf::from("/docs/noext")));
    }

    struct FixedEncoder;

    impl TextEncoder for FixedEncoder {
        fn model_name(&self) -> &str {
            "fixed"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncodeError> {
            Ok(texts.iter().map(|_| vec![1.0, 2.0]).collect())
        }
    }

    #[test]
    fn test_encode_query_uses_encode() {
        let encoder = FixedEncoder;
        let vector = encoder.encode_query("hello").unwrap();
        assert_eq!(vector, vec![1.0, 2.0]);
    }
}
