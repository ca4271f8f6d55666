use crate::error::TijError;
use crate::extraction::{PageContent, PdfExtractor};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use tracing::debug;

/// TJ offsets below this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = -100.0;

/// Pure-Rust PDF extraction backend built on lopdf.
///
/// Walks each page's content stream and emits the shown strings. Runs that
/// are positioned separately (`Td`, `TD`, `Tm`, `T*`, `'`, `"`, wide `TJ`
/// gaps) are separated by a space and text objects end with a newline, so
/// column-placed numbers stay distinct tokens. Strings are read as Latin-1
/// unless they carry a UTF-16BE byte order mark; fonts that need a ToUnicode
/// map are better served by the pdftotext backend.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TijError> {
        let doc = Document::load_mem(pdf_bytes).map_err(|e| TijError::DocumentOpen(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(TijError::DocumentOpen(
                "encrypted documents are not supported".into(),
            ));
        }

        // get_pages() is a BTreeMap, so this walks pages in ascending order.
        let page_ids = doc.get_pages();
        debug!(pages = page_ids.len(), "loaded PDF with lopdf");

        let mut pages = Vec::with_capacity(page_ids.len());
        for (&page_number, &page_id) in &page_ids {
            let data = doc
                .get_page_content(page_id)
                .map_err(|e| TijError::DocumentOpen(format!("page {page_number}: {e}")))?;
            let content = Content::decode(&data)
                .map_err(|e| TijError::DocumentOpen(format!("page {page_number}: {e}")))?;
            pages.push(PageContent {
                page_number: page_number as usize,
                text: text_from_operations(&content.operations),
            });
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

/// Collect the text shown by a page's operators.
fn text_from_operations(operations: &[Operation]) -> String {
    let mut text = String::new();
    for op in operations {
        match op.operator.as_str() {
            "Td" | "TD" | "Tm" | "T*" => separate(&mut text, ' '),
            "Tj" => {
                if let Some(operand) = op.operands.first() {
                    push_shown(&mut text, operand);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::Integer(n) if (*n as f32) < TJ_SPACE_THRESHOLD => {
                                separate(&mut text, ' ')
                            }
                            Object::Real(n) if *n < TJ_SPACE_THRESHOLD => separate(&mut text, ' '),
                            _ => push_shown(&mut text, item),
                        }
                    }
                }
            }
            // Both move to the next line first; the string is the last operand.
            "'" | "\"" => {
                separate(&mut text, ' ');
                if let Some(operand) = op.operands.last() {
                    push_shown(&mut text, operand);
                }
            }
            "ET" => {
                let trimmed = text.trim_end_matches(' ').len();
                text.truncate(trimmed);
                separate(&mut text, '\n');
            }
            _ => {}
        }
    }
    text
}

/// Append `sep` unless the text is empty or already ends in whitespace.
fn separate(text: &mut String, sep: char) {
    if text.chars().last().is_some_and(|c| !c.is_whitespace()) {
        text.push(sep);
    }
}

fn push_shown(text: &mut String, operand: &Object) {
    if let Object::String(bytes, _) = operand {
        text.push_str(&decode_string(bytes));
    }
}

fn decode_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}
