//! Date extraction for Indonesian invoices.

use super::FieldExtractor;
use super::patterns::DATE_LONG;

/// Extracts the first "<day> <month name> <year>" date.
///
/// Output keeps the day as printed and uses a two-digit month:
/// `5 Januari 2024` becomes `5-01-2024`.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// All dates with a recognized month, in text order.
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        DATE_LONG
            .captures_iter(text)
            .filter_map(|caps| {
                let month = indonesian_month_to_number(&caps[2])?;
                Some(format!("{}-{:02}-{}", &caps[1], month, &caps[3]))
            })
            .collect()
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    /// Only the first day-word-year occurrence is considered; an unknown
    /// month word there means no date.
    fn extract(&self, text: &str) -> Option<String> {
        let caps = DATE_LONG.captures(text)?;
        let month = indonesian_month_to_number(&caps[2])?;
        Some(format!("{}-{:02}-{}", &caps[1], month, &caps[3]))
    }
}

/// Extract the invoice date.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text)
}

/// Month number for an Indonesian month name.
pub fn indonesian_month_to_number(month: &str) -> Option<u32> {
    match month {
        "Januari" => Some(1),
        "Februari" => Some(2),
        "Maret" => Some(3),
        "April" => Some(4),
        "Mei" => Some(5),
        "Juni" => Some(6),
        "Juli" => Some(7),
        "Agustus" => Some(8),
        "September" => Some(9),
        "Oktober" => Some(10),
        "November" => Some(11),
        "Desember" => Some(12),
        _ => None,
    }
}
