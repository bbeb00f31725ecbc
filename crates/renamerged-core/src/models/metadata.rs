//! Metadata extracted from one tax invoice.

use serde::{Deserialize, Serialize};

/// Shown in place of a partner name that was not found.
pub const PARTNER_NOT_FOUND: &str = "Nama tidak ditemukan";

/// Shown in place of a seller ID that was not found.
pub const SELLER_ID_NOT_FOUND: &str = "IDTKU_Tidak_Ditemukan";

/// Shown in place of a date that was not found.
pub const DATE_NOT_FOUND: &str = "Tanggal tidak ditemukan";

/// Marker for an invoice without a detected number.
pub const INVOICE_NUMBER_NOT_FOUND: &str = "NoFaktur";

/// Shown in place of an empty reference.
pub const REFERENCE_NOT_FOUND: &str = "NoRef";

/// Fields extracted from the text of one e-Faktur PDF.
///
/// Missing fields are `None` (or an empty reference); sentinel text is only
/// produced by the `*_or_sentinel` accessors when a string is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// 22-digit seller place-of-business ID (ID TKU).
    pub seller_id: Option<String>,

    /// Title-cased buyer name.
    pub partner_name: Option<String>,

    /// Invoice number, sanitized and at most 50 characters.
    pub invoice_number: Option<String>,

    /// Invoice date as `D-MM-YYYY` (day as printed on the invoice).
    pub date: Option<String>,

    /// Sanitized reference; empty when the invoice has none.
    #[serde(default)]
    pub reference: String,
}

impl ExtractedMetadata {
    /// Seller ID or its sentinel.
    pub fn seller_id_or_sentinel(&self) -> &str {
        self.seller_id.as_deref().unwrap_or(SELLER_ID_NOT_FOUND)
    }

    /// Partner name or its sentinel.
    pub fn partner_name_or_sentinel(&self) -> &str {
        self.partner_name.as_deref().unwrap_or(PARTNER_NOT_FOUND)
    }

    /// Invoice number or its sentinel.
    pub fn invoice_number_or_sentinel(&self) -> &str {
        self.invoice_number.as_deref().unwrap_or(INVOICE_NUMBER_NOT_FOUND)
    }

    /// Date or its sentinel.
    pub fn date_or_sentinel(&self) -> &str {
        self.date.as_deref().unwrap_or(DATE_NOT_FOUND)
    }

    /// Whether the invoice has a reference.
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }
}
