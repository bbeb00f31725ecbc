//! Length budget enforcement for joined filenames.
//!
//! Components arrive as plain strings, so the truncation policy recovers
//! their roles from position and shape: the first part is the name, the
//! first date-shaped part is the date, the last part is the invoice number,
//! and everything else is reference text that may be shortened or dropped.

use crate::invoice::rules::patterns::{DATE_COMPONENT, INVOICE_NUMBER_COMPONENT};
use crate::invoice::rules::sanitize::truncate_chars;

/// Extension appended to every filename.
pub const EXTENSION: &str = ".pdf";

/// References are only kept when more than this many characters remain.
const MIN_REFERENCE_ROOM: isize = 10;

/// Room taken by the `{...}` truncation marker.
const MARKER_LENGTH: isize = 5;

/// Join `parts` with `separator`, append `.pdf`, and shorten the result to at
/// most `budget` characters.
pub fn fit_to_budget(parts: &[String], separator: &str, budget: usize) -> String {
    let filename = format!("{}{}", parts.join(separator), EXTENSION);
    if char_len(&filename) <= budget {
        return filename;
    }

    let available = budget.saturating_sub(EXTENSION.len());
    let shortened = if parts.len() >= 2 {
        shorten_reference(parts, separator, available)
    } else {
        hard_truncate(&filename, available)
    };

    // Name, date and invoice number alone can still be over budget
    if char_len(&shortened) <= budget {
        shortened
    } else {
        hard_truncate(&shortened, available)
    }
}

/// Keep name, date and invoice number whole; shorten or drop the reference.
fn shorten_reference(parts: &[String], separator: &str, available: usize) -> String {
    let name = parts[0].as_str();
    let last = parts.len() - 1;
    let mut date: Option<&str> = None;
    let mut invoice_number: Option<&str> = None;
    let mut reference: Vec<&str> = Vec::new();

    for (i, part) in parts.iter().enumerate().skip(1) {
        if date.is_none() && DATE_COMPONENT.is_match(part) {
            date = Some(part);
            continue;
        }
        if invoice_number.is_none() && i == last && looks_like_invoice_number(part) {
            invoice_number = Some(part);
            continue;
        }
        reference.push(part);
    }

    let invoice_number = invoice_number.unwrap_or_else(|| {
        let forced = parts[last].as_str();
        if reference.last() == Some(&forced) {
            reference.pop();
        }
        forced
    });

    let fixed = match date {
        Some(date) => format!("{}{}{}", name, separator, date),
        None => name.to_string(),
    };
    let suffix = format!(" {}", invoice_number);
    let reference = reference.join(separator);

    // The reference is always attached with one separator
    let fixed_length = char_len(&fixed) + char_len(&suffix) + char_len(separator);
    let remaining = available as isize - fixed_length as isize;

    if remaining > MIN_REFERENCE_ROOM && !reference.is_empty() {
        let limit = (remaining - MARKER_LENGTH) as usize;
        let reference = if char_len(&reference) > limit {
            format!("{{{}...}}", truncate_chars(&reference, limit))
        } else {
            reference
        };
        format!("{}{}{}{}{}", fixed, separator, reference, suffix, EXTENSION)
    } else {
        format!("{}{}{}", fixed, suffix, EXTENSION)
    }
}

/// Cut the stem to `available - 3` characters and end with `....pdf`.
fn hard_truncate(filename: &str, available: usize) -> String {
    let stem = filename.strip_suffix(EXTENSION).unwrap_or(filename);
    format!("{}....pdf", truncate_chars(stem, available.saturating_sub(3)))
}

fn looks_like_invoice_number(part: &str) -> bool {
    (!part.is_empty() && part.chars().all(char::is_numeric)) || INVOICE_NUMBER_COMPONENT.is_match(part)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
