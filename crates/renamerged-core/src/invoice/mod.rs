//! Invoice metadata extraction module.

mod parser;
pub mod rules;

pub use parser::FakturParser;

use crate::error::PdfError;
use crate::models::metadata::ExtractedMetadata;

/// Result type for extraction operations. Only reading the source can fail.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for invoice metadata parsers.
pub trait MetadataParser {
    /// Parse metadata from extracted text. Missing fields are left empty.
    fn parse(&self, text: &str) -> ExtractedMetadata;
}
