//! Partner (buyer) name and seller ID extraction.

use super::patterns::{PARTNER_NAME, SELLER_ID};
use super::sanitize::title_case;

/// Extract the buyer name from the "Pembeli Barang Kena Pajak" block,
/// title-cased.
pub fn extract_partner_name(text: &str) -> Option<String> {
    let caps = PARTNER_NAME.captures(text)?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| title_case(name))
}

/// Extract the first standalone 22-digit seller ID (ID TKU).
pub fn extract_seller_id(text: &str) -> Option<String> {
    SELLER_ID.captures(text).map(|caps| caps[1].to_string())
}
