//! DOCX extractor.
//!
//! Uses docx-rs to parse the document body and concatenate paragraph texts.

use std::fs;
use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::debug;

use docrag_core::{ContentExtractor, DocumentText, LoadError};

/// Extractor for `.docx` files.
///
/// Produces a single record per file: all paragraph texts in document order,
/// joined with a line break. DOCX has no fixed pagination, so `page` is
/// always absent.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for DocxExtractor {
    fn extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn extract(&self, path: &Path, file_name: &str) -> Result<Vec<DocumentText>, LoadError> {
        debug!("extracting docx: {:?}", path);

        let bytes = fs::read(path)?;
        let docx = docx_rs::read_docx(&bytes).map_err(|e| LoadError::Docx {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(vec![DocumentText::whole_file(
            file_name,
            paragraphs.join("\n"),
        )])
    }
}

/// Concatenate the run texts of one paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
