//! Config command - manage the settings file.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use renamerged_core::RenamergedConfig;

use super::settings_path;

/// Optional key left out of the file while unset.
const OPTIONAL_KEY: &str = "max_filename_length";

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current settings
    Show,

    /// Write a settings file with the defaults
    Init(InitArgs),

    /// Get a specific setting
    Get {
        /// Setting key (e.g., "separator")
        key: String,
    },

    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Show settings file path
    Path,

    /// Delete the settings file so the defaults apply again
    Reset,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the settings file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = settings_path(config_path);
    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
        ConfigCommand::Reset => reset_config(&path),
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No settings file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = RenamergedConfig::load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, default_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| default_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Settings file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    RenamergedConfig::default().save(&output_path)?;

    println!(
        "{} Created settings file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = RenamergedConfig::load_or_default(path)?;
    let json = serde_json::to_value(&config)?;

    let value = match json.get(key) {
        Some(value) => value.clone(),
        None if key == OPTIONAL_KEY => serde_json::Value::Null,
        None => anyhow::bail!("Setting not found: {}", key),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = RenamergedConfig::load_or_default(path)?;

    // Plain strings such as "_" are accepted without JSON quoting
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let object = json
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Settings are not a JSON object"))?;
    if !object.contains_key(key) && key != OPTIONAL_KEY {
        anyhow::bail!("Setting not found: {}", key);
    }
    object.insert(key.to_string(), parsed_value.clone());

    let config: RenamergedConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config
        .naming_settings()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Settings file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'renamerged config init' to create a settings file.");
    }

    Ok(())
}

fn reset_config(path: &Path) -> anyhow::Result<()> {
    RenamergedConfig::reset(path)?;

    println!(
        "{} Settings reset to defaults ({} removed)",
        style("✓").green(),
        path.display()
    );

    Ok(())
}
