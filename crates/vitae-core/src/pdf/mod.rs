//! PDF processing module.

mod extractor;

pub use extractor::{PdfExtractor, PAGE_SEPARATOR};

use crate::error::DocumentError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for PDF text extraction implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text runs of a single page (1-indexed), joined with spaces.
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract text from the entire PDF, one line per page.
    fn extract_text(&self) -> Result<String>;
}
