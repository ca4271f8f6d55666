pub mod native;
pub mod pdftotext;

use crate::error::TijError;
use std::path::{Path, PathBuf};

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page index.
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page
    /// in page order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TijError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// A raw document that can be read in full, from the start, any number of
/// times. Every call to `read_all` returns the complete original content.
pub trait DocumentSource {
    fn read_all(&self) -> Result<Vec<u8>, TijError>;

    /// Human-readable name used in logs and error messages.
    fn name(&self) -> String;
}

/// Document held in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        MemoryDocument {
            name: name.into(),
            bytes,
        }
    }
}

impl DocumentSource for MemoryDocument {
    fn read_all(&self) -> Result<Vec<u8>, TijError> {
        Ok(self.bytes.clone())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Document on disk; re-opened on every read.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileDocument {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FileDocument {
    fn read_all(&self) -> Result<Vec<u8>, TijError> {
        Ok(std::fs::read(&self.path)?)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Concatenate page texts in page order, without any separator.
pub fn extract_text(pages: &[PageContent]) -> String {
    pages.iter().map(|p| p.text.as_str()).collect()
}
