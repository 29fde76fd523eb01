//! Flat (brute-force) L2 index.

use docrag_core::{IndexBuildError, QueryError};
use tracing::debug;

/// One search result: the vector's insertion index and its squared L2
/// distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the matched vector in the build order
    pub index: usize,
    /// Squared Euclidean distance to the query
    pub distance: f32,
}

/// Exact nearest-neighbor index over a fixed set of vectors.
///
/// The dimension is derived from the first vector at build time; every
/// vector must share it. An empty vector set builds an empty index, which
/// answers every query with an empty result.
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index over `vectors`.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, IndexBuildError> {
        let dimension = vectors.first().map_or(0, Vec::len);

        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dimension {
                return Err(IndexBuildError::DimensionMismatch {
                    expected: dimension,
                    found: vector.len(),
                    position,
                });
            }
        }

        debug!(
            "built flat index: {} vectors, dimension {}",
            vectors.len(),
            dimension
        );
        Ok(Self { dimension, vectors })
    }

    /// Number of indexed vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Embedding dimension (0 for an empty index).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the `k` nearest vectors to `query`, nearest first.
    ///
    /// Distances are squared Euclidean. Ties are broken by insertion index.
    /// At most `len()` results are returned; an empty index yields an empty
    /// result for any `k >= 1`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, QueryError> {
        if k == 0 {
            return Err(QueryError::ZeroK);
        }
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(QueryError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| Neighbor {
                index,
                distance: squared_l2(query, vector),
            })
            .collect();

        // Stable sort: equal distances keep insertion order.
        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
