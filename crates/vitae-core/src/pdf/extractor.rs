//! PDF text extraction using lopdf.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document, Encoding, Object};
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::DocumentError;

/// Character placed between consecutive pages.
pub const PAGE_SEPARATOR: char = '\n';

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }

    /// Load a document and return its full text in one step.
    pub fn extract_from_bytes(data: &[u8]) -> Result<String> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.extract_text()
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| DocumentError::ExtractionFailed("no document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentError::ExtractionFailed(format!("failed to parse PDF: {}", e)))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::ExtractionFailed("PDF is encrypted".to_string()));
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::ExtractionFailed("PDF has no pages".to_string()));
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(DocumentError::ExtractionFailed(format!("invalid page number: {}", page)));
        }

        let page_error = |e: lopdf::Error| DocumentError::ExtractionFailed(format!("page {}: {}", page, e));

        let pages = doc.get_pages();
        let page_id = *pages
            .get(&page)
            .ok_or_else(|| DocumentError::ExtractionFailed(format!("page {} not found", page)))?;

        let encodings: BTreeMap<Vec<u8>, Encoding> = doc
            .get_page_fonts(page_id)
            .map_err(page_error)?
            .into_iter()
            .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
            .collect();

        let content = Content::decode(&doc.get_page_content(page_id).map_err(page_error)?)
            .map_err(page_error)?;

        let mut runs = Vec::new();
        let mut encoding = None;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|font| font.as_name().ok())
                        .and_then(|name| encodings.get(name));
                }
                // `'` and `"` carry the string as their last operand.
                "Tj" | "'" | "\"" => {
                    if let Some(Object::String(bytes, _)) = operation.operands.last() {
                        runs.push(decode_run(encoding, bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(parts)) = operation.operands.first() {
                        runs.push(decode_array(encoding, parts));
                    }
                }
                _ => {}
            }
        }

        Ok(join_runs(&runs))
    }

    fn extract_text(&self) -> Result<String> {
        let page_count = self.document().map(|_| self.page_count())?;

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            // A page whose content stream cannot be decoded still occupies its slot.
            let text = match self.extract_page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping unreadable page {}: {}", page, e);
                    String::new()
                }
            };
            trace!("Page {}: {} chars", page, text.len());
            pages.push(text);
        }

        let text = pages.join(&PAGE_SEPARATOR.to_string());
        debug!("Extracted {} chars from {} pages", text.len(), page_count);
        Ok(text)
    }
}

/// Kerning adjustment wide enough to stand for a word gap inside `TJ`.
const TJ_WORD_GAP: i64 = -100;

fn decode_run(encoding: Option<&Encoding>, bytes: &[u8]) -> String {
    encoding
        .and_then(|enc| Document::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| decode_raw(bytes))
}

fn decode_array(encoding: Option<&Encoding>, parts: &[Object]) -> String {
    let mut run = String::new();
    for part in parts {
        match part {
            Object::String(bytes, _) => run.push_str(&decode_run(encoding, bytes)),
            Object::Integer(gap) if *gap < TJ_WORD_GAP => run.push(' '),
            Object::Real(gap) if *gap < TJ_WORD_GAP as f32 => run.push(' '),
            _ => {}
        }
    }
    run
}

/// Decoding for strings whose font has no usable encoding: UTF-16BE with a
/// byte order mark, then UTF-8, then Latin-1.
fn decode_raw(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Put a page's text runs on a single line, one space between runs.
fn join_runs<S: AsRef<str>>(runs: &[S]) -> String {
    runs.iter()
        .flat_map(|run| run.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
