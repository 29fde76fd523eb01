//! Directory loading.
//!
//! Routes each file in a directory to the extractor matching its extension.

use std::fs;
use std::path::Path;

use tracing::debug;

use docrag_core::{ContentExtractor, DocumentText, LoadError};

use crate::{DocxExtractor, PdfExtractor, TextExtractor};

/// Result of loading a directory.
#[derive(Debug, Default)]
pub struct LoadOutput {
    /// Extraction records, in (sorted file, page) order
    pub documents: Vec<DocumentText>,
    /// File names whose extension no extractor supports
    pub skipped: Vec<String>,
}

/// Loads every supported file in one directory.
///
/// Enumeration is non-recursive and sorted by file name, so corpus
/// construction is deterministic. The first unreadable supported file aborts
/// the whole load: a single bad document blocks the entire corpus.
pub struct DirectoryLoader {
    extractors: Vec<Box<dyn ContentExtractor>>,
}

impl DirectoryLoader {
    /// Create a loader with the standard extractors (PDF, DOCX, TXT).
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(PdfExtractor::new()),
                Box::new(DocxExtractor::new()),
                Box::new(TextExtractor::new()),
            ],
        }
    }

    /// Load all supported files under `dir`.
    pub fn load(&self, dir: &Path) -> Result<LoadOutput, LoadError> {
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        let mut output = LoadOutput::default();
        for path in entries {
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            match self.extractors.iter().find(|e| e.can_extract(&path)) {
                Some(extractor) => {
                    let records = extractor.extract(&path, &file_name)?;
                    output.documents.extend(records);
                }
                None => {
                    debug!("skipping unsupported file: {}", file_name);
                    output.skipped.push(file_name);
                }
            }
        }

        debug!(
            "loaded {} records, skipped {} files",
            output.documents.len(),
            output.skipped.len()
        );
        Ok(output)
    }
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_txt_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha words").unwrap();
        std::fs::write(dir.path().join("b.txt"), "beta words").unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        assert_eq!(output.documents.len(), 2);
        assert_eq!(output.documents[0].file_name, "a.txt");
        assert_eq!(output.documents[1].file_name, "b.txt");
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_unsupported_extensions_are_skipped_silently() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("data.csv"), "a,b,c").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "real content").unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.documents[0].file_name, "notes.txt");
        assert_eq!(output.skipped, vec!["data.csv".to_string()]);
    }

    #[test]
    fn test_file_without_extension_is_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("README"), "no extension").unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        assert!(output.documents.is_empty());
        assert_eq!(output.skipped, vec!["README".to_string()]);
    }

    #[test]
    fn test_subdirectories_are_ignored() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();
        std::fs::write(dir.path().join("real.txt"), "content").unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        assert_eq!(output.documents.len(), 1);
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_empty_directory_yields_empty_output() {
        let dir = tempdir().unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        assert!(output.documents.is_empty());
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = DirectoryLoader::new()
            .load(Path::new("/nonexistent/docs"))
            .unwrap_err();

        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_corrupt_pdf_aborts_whole_load() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("good.txt"), "fine content").unwrap();
        std::fs::write(dir.path().join("zz-broken.pdf"), b"not a pdf").unwrap();

        let err = DirectoryLoader::new().load(dir.path()).unwrap_err();

        assert!(matches!(err, LoadError::Pdf { .. }));
    }

    #[test]
    fn test_load_order_is_sorted_by_file_name() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("zebra.txt"), "z").unwrap();
        std::fs::write(dir.path().join("apple.txt"), "a").unwrap();
        std::fs::write(dir.path().join("mango.txt"), "m").unwrap();

        let output = DirectoryLoader::new().load(dir.path()).unwrap();

        let names: Vec<&str> = output
            .documents
            .iter()
            .map(|d| d.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["apple.txt", "mango.txt", "zebra.txt"]);
    }
}
