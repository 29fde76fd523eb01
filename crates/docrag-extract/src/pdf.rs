//! PDF extractor.
//!
//! Uses lopdf to extract text page by page.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use docrag_core::{ContentExtractor, DocumentText, LoadError};

/// Extractor for `.pdf` files.
///
/// Produces one record per page with the page's full extracted text and a
/// 1-based page number. A PDF that cannot be parsed, or a page whose text
/// cannot be decoded, is a [`LoadError::Pdf`].
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for PdfExtractor {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn extract(&self, path: &Path, file_name: &str) -> Result<Vec<DocumentText>, LoadError> {
        debug!("extracting pdf: {:?}", path);

        let doc = Document::load(path).map_err(|e| LoadError::Pdf {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        // get_pages keys are 1-based page ordinals in document order.
        let mut records = Vec::new();
        for (page_number, _) in doc.get_pages() {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|e| LoadError::Pdf {
                    file: file_name.to_string(),
                    message: format!("page {page_number}: {e}"),
                })?;
            records.push(DocumentText::page(file_name, page_number, text));
        }

        debug!("extracted {} pages from {}", records.len(), file_name);
        Ok(records)
    }
}
