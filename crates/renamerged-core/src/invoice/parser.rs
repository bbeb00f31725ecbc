//! e-Faktur metadata parser.

use std::path::Path;

use tracing::debug;

use crate::models::metadata::ExtractedMetadata;
use crate::pdf::{PdfExtractor, PdfProcessor};

use super::rules::{
    DateExtractor, FieldExtractor, InvoiceNumberExtractor, ReferenceExtractor,
    extract_partner_name, extract_seller_id,
};
use super::{MetadataParser, Result};

/// Rule-based parser for Indonesian tax invoice (e-Faktur) text.
pub struct FakturParser {
    dates: DateExtractor,
    invoice_numbers: InvoiceNumberExtractor,
    references: ReferenceExtractor,
}

impl FakturParser {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            invoice_numbers: InvoiceNumberExtractor::new(),
            references: ReferenceExtractor::new(),
        }
    }

    /// Read a PDF and parse its text.
    pub fn parse_file(&self, path: &Path) -> Result<ExtractedMetadata> {
        let text = PdfExtractor::open(path)?.extract_text()?;
        let metadata = self.parse(&text);
        debug!(
            "{}: partner={:?} date={:?} number={:?}",
            path.display(),
            metadata.partner_name,
            metadata.date,
            metadata.invoice_number
        );
        Ok(metadata)
    }
}

impl Default for FakturParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataParser for FakturParser {
    fn parse(&self, text: &str) -> ExtractedMetadata {
        ExtractedMetadata {
            partner_name: extract_partner_name(text),
            seller_id: extract_seller_id(text),
            date: self.dates.extract(text),
            invoice_number: self.invoice_numbers.extract(text),
            reference: self.references.extract(text).unwrap_or_default(),
        }
    }
}
