//! Filename naming settings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Budget used when no override is configured.
pub const DEFAULT_MAX_FILENAME_LENGTH: usize = 130;

/// Smallest accepted budget.
pub const MIN_FILENAME_LENGTH: usize = 20;

/// Characters that may not appear in a filename on Windows.
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A metadata field that may appear in a generated filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "Nama Lawan Transaksi", alias = "Name")]
    Name,
    #[serde(rename = "Tanggal Faktur Pajak", alias = "Date")]
    Date,
    #[serde(rename = "Referensi", alias = "Reference")]
    Reference,
    #[serde(rename = "Nomor Faktur Pajak", alias = "InvoiceNumber")]
    InvoiceNumber,
}

impl Component {
    /// All components in the default order.
    pub const ALL: [Component; 4] = [
        Component::Name,
        Component::Date,
        Component::Reference,
        Component::InvoiceNumber,
    ];

    /// Canonical label, as stored in the settings file.
    pub fn label(self) -> &'static str {
        match self {
            Component::Name => "Nama Lawan Transaksi",
            Component::Date => "Tanggal Faktur Pajak",
            Component::Reference => "Referensi",
            Component::InvoiceNumber => "Nomor Faktur Pajak",
        }
    }
}

/// How generated filenames are assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingSettings {
    enabled: BTreeSet<Component>,
    component_order: Option<Vec<Component>>,
    separator: String,
    slash_replacement: String,
    wrap_reference: bool,
    max_filename_length: Option<usize>,
}

impl NamingSettings {
    /// All components enabled, default order, `-` separator, `_` for slashes.
    pub fn new() -> Self {
        Self {
            enabled: Component::ALL.into_iter().collect(),
            component_order: None,
            separator: "-".to_string(),
            slash_replacement: "_".to_string(),
            wrap_reference: false,
            max_filename_length: None,
        }
    }

    /// Enable or disable a component.
    pub fn with_component(mut self, component: Component, enabled: bool) -> Self {
        if enabled {
            self.enabled.insert(component);
        } else {
            self.enabled.remove(&component);
        }
        self
    }

    /// Set the order in which components are joined.
    pub fn with_order(mut self, order: Vec<Component>) -> Self {
        self.component_order = Some(order);
        self
    }

    /// Set the separator placed between components.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the replacement for `/` inside components.
    pub fn with_slash_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.slash_replacement = replacement.into();
        self
    }

    /// Wrap a non-empty reference in parentheses.
    pub fn with_wrap_reference(mut self, wrap: bool) -> Self {
        self.wrap_reference = wrap;
        self
    }

    /// Override the filename length budget.
    pub fn with_max_filename_length(mut self, max: Option<usize>) -> Self {
        self.max_filename_length = max;
        self
    }

    /// Check the invariants every filename relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_separator("separator", &self.separator)?;
        check_separator("slash_replacement", &self.slash_replacement)?;

        if let Some(order) = &self.component_order {
            let unique: BTreeSet<_> = order.iter().collect();
            if unique.len() != order.len() {
                return Err(SettingsError::ComponentOrder(format!(
                    "duplicate component in {:?}",
                    order
                )));
            }
            if order.len() != Component::ALL.len() {
                return Err(SettingsError::ComponentOrder(format!(
                    "expected all {} components, got {:?}",
                    Component::ALL.len(),
                    order
                )));
            }
        }

        if let Some(max) = self.max_filename_length {
            if max < MIN_FILENAME_LENGTH {
                return Err(SettingsError::BudgetTooSmall(max));
            }
        }

        Ok(())
    }

    pub fn is_enabled(&self, component: Component) -> bool {
        self.enabled.contains(&component)
    }

    /// Components in join order.
    pub fn order(&self) -> &[Component] {
        self.component_order.as_deref().unwrap_or(&Component::ALL)
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn slash_replacement(&self) -> &str {
        &self.slash_replacement
    }

    pub fn wrap_reference(&self) -> bool {
        self.wrap_reference
    }

    pub fn max_filename_length(&self) -> Option<usize> {
        self.max_filename_length
    }

    /// The budget in effect: the override, else the default.
    pub fn budget(&self) -> usize {
        self.max_filename_length.unwrap_or(DEFAULT_MAX_FILENAME_LENGTH)
    }
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn check_separator(field: &'static str, value: &str) -> Result<(), SettingsError> {
    if value.contains(RESERVED_CHARS) {
        return Err(SettingsError::ReservedCharacter {
            field,
            value: value.to_string(),
        });
    }
    if value.chars().count() > 1 {
        return Err(SettingsError::TooLong {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
