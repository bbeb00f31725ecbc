//! Filename generation from extracted metadata.

use crate::error::SettingsError;
use crate::invoice::rules::patterns::WHITESPACE;
use crate::models::metadata::{ExtractedMetadata, REFERENCE_NOT_FOUND};
use crate::models::settings::{Component, NamingSettings, RESERVED_CHARS};

use super::truncate::{EXTENSION, fit_to_budget};

/// Placeholder used when no component is left.
pub const UNNAMED: &str = "unnamed";

/// Ordered, non-empty filename components for one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameCandidate {
    parts: Vec<String>,
}

impl FilenameCandidate {
    fn new(parts: Vec<String>) -> Self {
        if parts.is_empty() {
            Self {
                parts: vec![UNNAMED.to_string()],
            }
        } else {
            Self { parts }
        }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Join with `separator` and append the extension, without any length
    /// limit.
    pub fn to_filename(&self, separator: &str) -> String {
        format!("{}{}", self.parts.join(separator), EXTENSION)
    }
}

/// Builds filesystem-legal filenames from invoice metadata.
///
/// Settings are validated once on construction; building itself never fails.
#[derive(Debug, Clone)]
pub struct FilenameBuilder {
    settings: NamingSettings,
}

impl FilenameBuilder {
    pub fn new(settings: NamingSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &NamingSettings {
        &self.settings
    }

    /// Select, clean and order the enabled components.
    pub fn candidate(&self, metadata: &ExtractedMetadata) -> FilenameCandidate {
        let parts = self
            .settings
            .order()
            .iter()
            .filter(|component| self.settings.is_enabled(**component))
            .filter_map(|component| self.render(*component, metadata))
            .filter(|part| !part.is_empty())
            .collect();
        FilenameCandidate::new(parts)
    }

    /// Candidate filename before the length budget is applied.
    pub fn untruncated(&self, metadata: &ExtractedMetadata) -> String {
        self.candidate(metadata).to_filename(self.settings.separator())
    }

    /// Final filename, ending in `.pdf` and within the budget.
    pub fn build(&self, metadata: &ExtractedMetadata) -> String {
        let candidate = self.candidate(metadata);
        fit_to_budget(
            candidate.parts(),
            self.settings.separator(),
            self.settings.budget(),
        )
    }

    fn render(&self, component: Component, metadata: &ExtractedMetadata) -> Option<String> {
        let slash = self.settings.slash_replacement();
        match component {
            Component::Name => Some(clean_component(metadata.partner_name_or_sentinel(), slash)),
            Component::Date => Some(clean_component(metadata.date_or_sentinel(), slash)),
            Component::Reference => {
                let reference = clean_component(&metadata.reference, slash);
                if reference.is_empty() {
                    Some(REFERENCE_NOT_FOUND.to_string())
                } else if self.settings.wrap_reference() {
                    Some(format!("({})", reference))
                } else {
                    Some(reference)
                }
            }
            // An invoice without a detected number contributes nothing
            Component::InvoiceNumber => metadata
                .invoice_number
                .as_deref()
                .map(|number| clean_component(number, slash)),
        }
    }
}

/// Replace `/` with `slash_replacement`, other reserved and control
/// characters with spaces, then collapse whitespace.
pub fn clean_component(value: &str, slash_replacement: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '/' {
            out.push_str(slash_replacement);
        } else if RESERVED_CHARS.contains(&c) || c.is_control() {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    WHITESPACE.replace_all(&out, " ").trim().to_string()
}
