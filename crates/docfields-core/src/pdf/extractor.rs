//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
///
/// Pages are read one at a time with lopdf and joined with `=== PAGE n ===`
/// markers. When that yields too little text the whole document goes
/// through pdf-extract instead.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    page_markers: bool,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            page_markers: true,
            min_text_length: 20,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_page_markers(config.page_markers)
            .with_min_text_length(config.min_text_length)
    }

    /// Prefix each page's text with a `=== PAGE n ===` line.
    pub fn with_page_markers(mut self, enabled: bool) -> Self {
        self.page_markers = enabled;
        self
    }

    /// Per-page text shorter than this triggers whole-document extraction.
    pub fn with_min_text_length(mut self, length: usize) -> Self {
        self.min_text_length = length;
        self
    }

    /// Load a PDF file from disk.
    pub fn open(mut self, path: &Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        self.load(&data)?;
        Ok(self)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    fn extract_by_page(&self) -> Result<String> {
        let doc = self.document()?;
        let mut pages = Vec::new();

        for page_num in doc.get_pages().keys().copied() {
            match self.extract_page_text(page_num) {
                Ok(page_text) => {
                    trace!("Page {}: {} characters", page_num, page_text.len());
                    pages.push((page_num, page_text));
                }
                Err(e) => warn!("Page {}: {}", page_num, e),
            }
        }

        Ok(join_pages(pages, self.page_markers))
    }

    fn extract_whole_document(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Join page texts in reading order. Blank pages are skipped, marker and all.
fn join_pages(pages: impl IntoIterator<Item = (u32, String)>, markers: bool) -> String {
    let mut text = String::new();

    for (page_num, page_text) in pages {
        let page_text = page_text.trim_end();
        if page_text.trim().is_empty() {
            continue;
        }

        if markers {
            text.push_str(&format!("=== PAGE {} ===\n{}\n\n", page_num, page_text));
        } else {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(page_text);
        }
    }

    text
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
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

    fn extract_text(&self) -> Result<String> {
        let by_page = self.extract_by_page()?;
        let content_length = by_page
            .lines()
            .filter(|line| !line.starts_with("=== PAGE "))
            .map(|line| line.trim().len())
            .sum::<usize>();

        if content_length >= self.min_text_length {
            return Ok(by_page);
        }

        debug!(
            "Per-page extraction gave {} characters, falling back to whole document",
            content_length
        );

        let whole = self.extract_whole_document()?;
        if whole.trim().is_empty() {
            if content_length > 0 {
                return Ok(by_page);
            }
            return Err(PdfError::TextExtraction("no extractable text".to_string()));
        }

        Ok(whole)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
