//! # docrag-embed
//!
//! Local embedding generation for docrag using the Candle ML framework.
//!
//! Embeddings are produced offline with the
//! `sentence-transformers/all-MiniLM-L6-v2` model: tokenize with truncation,
//! pad the batch to a uniform length, run BERT in inference mode, and
//! mean-pool the final hidden state over the token axis. The identical
//! routine serves corpus chunks and incoming queries, so both live in the
//! same embedding space.
//!
//! ## Model Details
//!
//! | Property | Value |
//! |----------|-------|
//! | Model | `sentence-transformers/all-MiniLM-L6-v2` |
//! | Dimension | 384 |
//! | Max tokens | 512 |
//! | Architecture | BERT-based |
//!
//! ## Cargo Features
//!
//! - `candle` (default): enables the Candle stack and [`BertEncoder`]
//! - Without `candle`: only [`HashedEncoder`] is available
//!
//! ## Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BertEncoder`] | Transformer embeddings via Candle (requires `candle`) |
//! | [`HashedEncoder`] | Deterministic content-hash vectors for tests and offline development |

#[cfg(feature = "candle")]
pub mod bert;
pub mod hashed;

#[cfg(feature = "candle")]
pub use bert::BertEncoder;
pub use hashed::HashedEncoder;
