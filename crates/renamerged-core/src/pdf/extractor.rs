//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf for loading and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Read and load a PDF file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| PdfError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut extractor = Self::new();
        extractor.load(&data)?;
        Ok(extractor)
    }

    /// Check whether the bytes form a readable PDF with at least one page.
    pub fn validate(data: &[u8]) -> bool {
        let mut extractor = Self::new();
        match extractor.load(data) {
            Ok(()) => true,
            Err(e) => {
                debug!("PDF failed validation: {}", e);
                false
            }
        }
    }

    /// Check whether the file at `path` is a readable PDF.
    pub fn validate_file(path: &Path) -> bool {
        fs::read(path).map(|data| Self::validate(&data)).unwrap_or(false)
    }
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

            // pdf-extract needs the decrypted bytes
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

    fn extract_pages(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf-extract panics on some malformed fonts instead of returning an error
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
        }))
        .map_err(|_| PdfError::TextExtraction("text extraction panicked".to_string()))?
        .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        trace!(
            "Extracted {} pages, {} chars",
            pages.len(),
            pages.iter().map(|p| p.len()).sum::<usize>()
        );
        Ok(pages)
    }
}
