//! Plain-text extractor.

use std::fs;
use std::path::Path;

use docrag_core::{ContentExtractor, DocumentText, LoadError};

/// Extractor for `.txt` files.
///
/// Produces a single record containing the full file contents decoded as
/// UTF-8. A file that is not valid UTF-8 is a [`LoadError::Decode`].
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for TextExtractor {
    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn extract(&self, path: &Path, file_name: &str) -> Result<Vec<DocumentText>, LoadError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| LoadError::Decode {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        Ok(vec![DocumentText::whole_file(file_name, text)])
    }
}
