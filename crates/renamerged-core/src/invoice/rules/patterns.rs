//! Regex patterns for e-Faktur text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Buyer block: "Pembeli Barang Kena Pajak / Penerima Jasa Kena Pajak: Nama : ... Alamat"
    pub static ref PARTNER_NAME: Regex = Regex::new(
        r"(?s)Pembeli Barang Kena Pajak\s*/\s*Penerima Jasa Kena Pajak:\s*Nama\s*:\s*(.+?)\s*Alamat"
    ).unwrap();

    // Seller place-of-business ID (ID TKU): a run of exactly 22 digits,
    // usually printed after '#'
    pub static ref SELLER_ID: Regex = Regex::new(
        r"(?:^|\D)(\d{22})(?:\D|$)"
    ).unwrap();

    // "5 Januari 2024"; the month word is mapped separately
    pub static ref DATE_LONG: Regex = Regex::new(
        r"(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})"
    ).unwrap();

    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Faktur Pajak:\s*([\w\-/.]{1,50}?)(?:\s|$)"
    ).unwrap();

    // Reference, tried in order: bounded by a blank line or the next "Label:"
    pub static ref REFERENCE_PRIMARY: Regex = Regex::new(
        r"(?ms)Referensi:\s*([^}]*?)(?:\n\s*\n|\n\s*[A-Z][^:]*:|$)"
    ).unwrap();

    // ...bounded by the buyer block
    pub static ref REFERENCE_BEFORE_BUYER: Regex = Regex::new(
        r"(?ms)Referensi:\s*([^}]*?)(?:\n\s*Pembeli|$)"
    ).unwrap();

    // ...bounded by the next labelled line or an empty line end
    pub static ref REFERENCE_FALLBACK: Regex = Regex::new(
        r"(?ms)Referensi:\s*(.*?)(?:\n\s*(?:[A-Z][^:]*:|$))"
    ).unwrap();

    // Sanitization
    pub static ref CONTROL_CHARS: Regex = Regex::new(
        r"[\x00-\x1f\x7f-\x9f]"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Reserved filename characters except '/', which is replaced later by
    // the caller's slash replacement
    pub static ref REFERENCE_RESERVED: Regex = Regex::new(
        r#"[<>:"\\|?*()]"#
    ).unwrap();

    pub static ref TRAILING_CLOSERS: Regex = Regex::new(
        r"[)\]}]+$"
    ).unwrap();

    // Shapes used to re-classify joined components during truncation
    pub static ref DATE_COMPONENT: Regex = Regex::new(
        r"^\d{1,2}-\d{1,2}-\d{2,4}"
    ).unwrap();

    pub static ref INVOICE_NUMBER_COMPONENT: Regex = Regex::new(
        r"^[\d\w\-/]{8,}$"
    ).unwrap();
}
