//! Deterministic hash encoder for tests and offline development.
//!
//! [`HashedEncoder`] derives each vector from a blake3 hash of the text, so
//! identical texts map to identical vectors and distinct texts map to
//! distinct vectors with overwhelming probability. It carries no semantic
//! signal; it exists to exercise the chunk → index → retrieve path without
//! the Candle stack.

use blake3::Hasher;

use docrag_core::{EncodeError, TextEncoder};

/// Default dimension, matching the MiniLM encoder.
const DEFAULT_DIM: usize = 384;

/// Content-hash text encoder.
pub struct HashedEncoder {
    dimension: usize,
}

impl HashedEncoder {
    /// Create an encoder with the default dimension (384).
    #[must_use]
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIM,
        }
    }

    /// Create an encoder with a custom dimension.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut hasher = Hasher::new();
        hasher.update(text.as_bytes());
        let mut reader = hasher.finalize_xof();

        let mut bytes = vec![0u8; self.dimension];
        reader.fill(&mut bytes);

        bytes
            .into_iter()
            .map(|b| (f32::from(b) / 255.0) - 0.5)
            .collect()
    }
}

impl Default for HashedEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for HashedEncoder {
    fn model_name(&self) -> &str {
        "hashed"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncodeError> {
        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }
}
