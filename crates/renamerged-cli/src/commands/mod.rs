//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod inspect;
pub mod run;

use std::path::{Path, PathBuf};

use renamerged_core::models::config::SETTINGS_FILE_NAME;
use renamerged_core::{FilenameBuilder, RenamergedConfig};

/// `<config dir>/renamerged/user_settings.json`, or the `--config` override.
pub fn settings_path(config_path: Option<&str>) -> PathBuf {
    match config_path {
        Some(path) => PathBuf::from(path),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("renamerged")
            .join(SETTINGS_FILE_NAME),
    }
}

/// Settings from `--config` or the default location, defaults when absent.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RenamergedConfig> {
    Ok(RenamergedConfig::load_or_default(&settings_path(config_path))?)
}

/// Filename builder for `config`, optionally with another length budget.
pub fn filename_builder(
    config: &RenamergedConfig,
    max_length: Option<usize>,
) -> anyhow::Result<FilenameBuilder> {
    let mut settings = config.naming_settings()?;
    if max_length.is_some() {
        settings = settings.with_max_filename_length(max_length);
    }
    Ok(FilenameBuilder::new(settings)?)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
