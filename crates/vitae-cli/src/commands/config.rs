//! Config command handlers

use anyhow::{bail, Context, Result};

use vitae_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "mirror_dir": config.mirror_dir,
                    "mirror_enabled": config.mirror_enabled
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(dir) = &config.mirror_dir {
                println!("{}", dir.display());
            }
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  mirror_dir:     {}",
                config
                    .mirror_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  mirror_enabled: {}", config.mirror_enabled);
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "mirror_dir" => {
            config.mirror_dir = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone().into())
            };
        }
        "mirror_enabled" => {
            config.mirror_enabled = value
                .parse()
                .context("Invalid value for mirror_enabled. Use 'true' or 'false'.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: mirror_dir, mirror_enabled",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
