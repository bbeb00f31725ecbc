//! User settings file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::settings::{Component, NamingSettings};
use crate::error::{RenamergedError, SettingsError};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "user_settings.json";

/// What a batch run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessingMode {
    /// Copy each PDF under its generated name.
    #[default]
    #[serde(rename = "Rename Saja", alias = "rename")]
    Rename,
    /// Copy each PDF and merge the invoices of each partner into one file.
    #[serde(rename = "Rename dan Merge", alias = "merge")]
    RenameAndMerge,
}

impl ProcessingMode {
    /// Label shown to users and written to the settings file.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessingMode::Rename => "Rename Saja",
            ProcessingMode::RenameAndMerge => "Rename dan Merge",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Persisted user settings.
///
/// Keys not listed here (window theme and the like) are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenamergedConfig {
    /// Processing mode.
    pub mode: ProcessingMode,

    /// Include the partner name.
    pub use_name: bool,

    /// Include the invoice date.
    pub use_date: bool,

    /// Include the reference.
    pub use_reference: bool,

    /// Include the invoice number.
    pub use_faktur: bool,

    /// Wrap the reference in parentheses.
    pub wrap_reference: bool,

    /// Separator between components.
    pub separator: String,

    /// Replacement for `/` in components.
    pub slash_replacement: String,

    /// Order of the components.
    pub component_order: Vec<Component>,

    /// Filename length budget override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_filename_length: Option<usize>,
}

impl Default for RenamergedConfig {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::Rename,
            use_name: true,
            use_date: true,
            use_reference: true,
            use_faktur: true,
            wrap_reference: false,
            separator: "-".to_string(),
            slash_replacement: "_".to_string(),
            component_order: Component::ALL.to_vec(),
            max_filename_length: None,
        }
    }
}

impl RenamergedConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RenamergedError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| RenamergedError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, RenamergedError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file.
    ///
    /// Writes a sibling temp file and renames it over the target.
    pub fn save(&self, path: &Path) -> Result<(), RenamergedError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| RenamergedError::Config(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(path);
        if let Err(e) = fs::write(&temp_path, content).and_then(|_| fs::rename(&temp_path, path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Delete the settings file so defaults apply again.
    pub fn reset(path: &Path) -> Result<(), RenamergedError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Validated naming settings for this configuration.
    pub fn naming_settings(&self) -> Result<NamingSettings, SettingsError> {
        let settings = NamingSettings::new()
            .with_component(Component::Name, self.use_name)
            .with_component(Component::Date, self.use_date)
            .with_component(Component::Reference, self.use_reference)
            .with_component(Component::InvoiceNumber, self.use_faktur)
            .with_order(self.component_order.clone())
            .with_separator(self.separator.as_str())
            .with_slash_replacement(self.slash_replacement.as_str())
            .with_wrap_reference(self.wrap_reference)
            .with_max_filename_length(self.max_filename_length);
        settings.validate()?;
        Ok(settings)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
