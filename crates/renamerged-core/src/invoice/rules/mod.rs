//! Rule-based field extractors for e-Faktur text.

pub mod dates;
pub mod invoice_number;
pub mod parties;
pub mod patterns;
pub mod reference;
pub mod sanitize;

pub use dates::{DateExtractor, extract_date, indonesian_month_to_number};
pub use invoice_number::{InvoiceNumberExtractor, extract_invoice_number};
pub use parties::{extract_partner_name, extract_seller_id};
pub use reference::{ReferenceExtractor, extract_reference};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, `None` when absent.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
