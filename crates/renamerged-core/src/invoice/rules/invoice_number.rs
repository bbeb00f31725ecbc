//! Invoice number (Nomor Faktur Pajak) extraction.

use super::FieldExtractor;
use super::patterns::INVOICE_NUMBER;
use super::sanitize::sanitize_invoice_number;

/// Extracts the value following the "Faktur Pajak:" label.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        let caps = INVOICE_NUMBER.captures(text)?;
        sanitize_invoice_number(&caps[1])
    }
}

/// Extract the invoice number.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text)
}
