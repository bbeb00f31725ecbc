//! Reference (Referensi) extraction.
//!
//! The reference is free text whose end is not marked in the extracted page
//! text, so several boundary heuristics are tried in order.

use regex::Regex;
use tracing::trace;

use super::FieldExtractor;
use super::patterns::{REFERENCE_BEFORE_BUYER, REFERENCE_FALLBACK, REFERENCE_PRIMARY};
use super::sanitize::sanitize_reference;

/// Extracts and sanitizes the text after "Referensi:".
pub struct ReferenceExtractor {
    patterns: [&'static Regex; 3],
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self {
            patterns: [&*REFERENCE_PRIMARY, &*REFERENCE_BEFORE_BUYER, &*REFERENCE_FALLBACK],
        }
    }

    /// First non-empty raw capture, before sanitization.
    fn raw_capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.patterns.iter().enumerate().find_map(|(i, pattern)| {
            let capture = pattern.captures(text)?.get(1)?.as_str().trim();
            if capture.is_empty() {
                return None;
            }
            trace!("Reference matched pattern {}", i + 1);
            Some(capture)
        })
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        let reference = sanitize_reference(self.raw_capture(text)?);
        (!reference.is_empty()).then_some(reference)
    }
}

/// Extract the reference, or an empty string when there is none.
pub fn extract_reference(text: &str) -> String {
    ReferenceExtractor::new().extract(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_on_one_line() {
        let text = "Referensi: INV/2024/001\nPembeli Barang Kena Pajak";
        assert_eq!(extract_reference(text), "INV/2024/001");
    }

    #[test]
    fn test_reference_value_on_next_line() {
        let text = "Referensi:\n  Pembayaran Termin 2 (Proyek A)\n\nNama : X";
        assert_eq!(extract_reference(text), "Pembayaran Termin 2 Proyek A");
    }

    #[test]
    fn test_reference_falls_back_past_closing_brace() {
        // The first two patterns cannot cross '}', the last one can
        let text = "Referensi: PO 77}\n";
        assert_eq!(extract_reference(text), "PO 77");
    }

    #[test]
    fn test_reference_sanitized() {
        let text = "Referensi: Kontrak: A|B \"2024\"\n";
        assert_eq!(extract_reference(text), "Kontrak A B 2024");
    }

    #[test]
    fn test_no_reference_is_empty() {
        assert_eq!(extract_reference("Faktur Pajak: 123"), "");
    }

    #[test]
    fn test_label_without_value_is_empty() {
        assert_eq!(extract_reference("Referensi:"), "");
    }
}
