//! # docrag-extract
//!
//! Document loading for the docrag indexing pipeline.
//!
//! This crate reads files from a directory and produces
//! [`DocumentText`](docrag_core::DocumentText) records for downstream
//! chunking and embedding.
//!
//! ## Supported Formats
//!
//! | Extractor | Formats | Records produced |
//! |-----------|---------|------------------|
//! | [`PdfExtractor`] | `.pdf` | one per page, 1-based page number |
//! | [`DocxExtractor`] | `.docx` | one per file, paragraphs joined with newlines |
//! | [`TextExtractor`] | `.txt` | one per file, full UTF-8 contents |
//!
//! ## Loading a directory
//!
//! [`DirectoryLoader`] enumerates a directory (non-recursive), routes each
//! file to the extractor matching its extension, and fails fast on the first
//! unreadable document. Files with unsupported extensions are silently
//! skipped and reported back in [`LoadOutput::skipped`]; that list is the
//! only signal, since skipping is intended behavior, not an error.
//!
//! ```rust,ignore
//! use docrag_extract::DirectoryLoader;
//!
//! let loader = DirectoryLoader::new();
//! let output = loader.load(Path::new("./docs"))?;
//! println!("{} records, {} skipped", output.documents.len(), output.skipped.len());
//! ```

pub mod docx;
pub mod loader;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use loader::{DirectoryLoader, LoadOutput};
pub use pdf::PdfExtractor;
pub use text::TextExtractor;
