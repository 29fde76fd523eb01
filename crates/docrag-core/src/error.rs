//! Error types for docrag.

use thiserror::Error;

/// Main error type for docrag operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Document loading failed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Text encoding failed
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Index construction failed
    #[error("index build error: {0}")]
    IndexBuild(#[from] IndexBuildError),

    /// Query failed
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Document loading errors.
///
/// All variants are fatal at corpus construction: a single unreadable
/// document aborts the whole build (no partial corpus).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error in {file}: {message}")]
    Pdf { file: String, message: String },

    #[error("docx parse error in {file}: {message}")]
    Docx { file: String, message: String },

    #[error("decode error in {file}: {message}")]
    Decode { file: String, message: String },
}

/// Text encoding errors.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("model loading failed: {0}")]
    ModelLoad(String),

    #[error("tokenization failed: {0}")]
    Tokenize(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Index construction errors.
#[derive(Error, Debug)]
pub enum IndexBuildError {
    #[error("dimension mismatch at vector {position}: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("embedding set incomplete: {chunks} chunks but {embeddings} embeddings")]
    Incomplete { chunks: usize, embeddings: usize },
}

/// Query errors.
///
/// These are per-call: a failed query does not corrupt the index and the
/// caller may retry with different input.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("k must be at least 1")]
    ZeroK,

    #[error("query dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Result type alias for docrag operations.
pub type Result<T> = std::result::Result<T, Error>;
