use crate::error::TijError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs in reading-order mode by default; `with_layout(true)` switches to
/// `pdftotext -layout`, which keeps column alignment.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: false }
    }

    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TijError> {
        // pdftotext only reads from a path.
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(pdf_bytes)?;
        tmpfile.flush()?;

        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TijError::PdftotextNotFound
                } else {
                    TijError::DocumentOpen(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            // Exit code 1 is poppler's "error opening a PDF file".
            if code == 1 {
                return Err(TijError::DocumentOpen(stderr.trim().to_string()));
            }
            return Err(TijError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&text);
        debug!(pages = pages.len(), layout = self.layout, "ran pdftotext");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages. Pages are separated by form feed
/// (\x0c), and the output ends with one, so the trailing empty piece is not
/// a page.
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut pieces: Vec<&str> = text.split('\x0c').collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: page_text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_form_feed() {
        let pages = split_pages("page one\n\x0cpage two\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "page one\n");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "page two\n");
    }

    #[test]
    fn test_split_pages_keeps_blank_middle_page() {
        let pages = split_pages("a\x0c\x0cb\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
        assert_eq!(pages[2].page_number, 3);
    }

    #[test]
    fn test_split_pages_without_form_feed() {
        let pages = split_pages("only page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "only page");
    }
}
