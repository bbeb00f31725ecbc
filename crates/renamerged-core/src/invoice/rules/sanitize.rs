//! Text cleanup shared by the field extractors.

use super::patterns::{CONTROL_CHARS, REFERENCE_RESERVED, TRAILING_CLOSERS, WHITESPACE};

/// Longest reference kept, in characters.
pub const MAX_REFERENCE_LENGTH: usize = 200;

/// Longest invoice number kept, in characters.
pub const MAX_INVOICE_NUMBER_LENGTH: usize = 50;

/// Remove C0/C1 control characters.
pub fn strip_control_chars(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").into_owned()
}

/// Collapse runs of whitespace into one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Clean a raw invoice number capture. Returns `None` when nothing is left.
pub fn sanitize_invoice_number(raw: &str) -> Option<String> {
    let cleaned = collapse_whitespace(&strip_control_chars(raw));
    let cleaned = truncate_chars(&cleaned, MAX_INVOICE_NUMBER_LENGTH).trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Clean a raw reference capture into a filename-friendly string.
///
/// Control characters, line breaks included, are removed before whitespace
/// is collapsed, so a word split across lines is joined back together. `/`
/// is kept so the filename builder can apply the configured slash
/// replacement.
pub fn sanitize_reference(raw: &str) -> String {
    let text = strip_control_chars(raw);
    let text = collapse_whitespace(&text);
    let text = REFERENCE_RESERVED.replace_all(&text, " ");
    let text = TRAILING_CLOSERS.replace(text.trim(), "");
    let text = collapse_whitespace(&text);
    truncate_chars(&text, MAX_REFERENCE_LENGTH).trim().to_string()
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
