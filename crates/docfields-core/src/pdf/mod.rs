//! PDF text acquisition.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Text of the whole document in reading order.
    fn extract_text(&self) -> Result<String>;

    /// Text of one page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}
