//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/vitae/config.toml)
//! 3. Environment variables (VITAE_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "VITAE";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The user-granted directory for mirrored resume files.
    /// `None` means no directory has been granted: mirroring is off.
    #[serde(default)]
    pub mirror_dir: Option<PathBuf>,

    /// Whether mirroring is enabled (a granted directory can be kept
    /// while temporarily disabling writes)
    #[serde(default = "default_mirror_enabled")]
    pub mirror_enabled: bool,
}

fn default_mirror_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_dir: None,
            mirror_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (VITAE_MIRROR_DIR, VITAE_MIRROR_ENABLED)
    /// 2. Config file (~/.config/vitae/config.toml or VITAE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // VITAE_MIRROR_DIR
        if let Ok(val) = std::env::var(format!("{}_MIRROR_DIR", ENV_PREFIX)) {
            self.mirror_dir = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // VITAE_MIRROR_ENABLED
        if let Ok(val) = std::env::var(format!("{}_MIRROR_ENABLED", ENV_PREFIX)) {
            self.mirror_enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the VITAE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitae")
            .join("config.toml")
    }

    /// The effective mirror root: the granted directory, unless
    /// mirroring is disabled
    pub fn mirror_root(&self) -> Option<PathBuf> {
        if self.mirror_enabled {
            self.mirror_dir.clone()
        } else {
            None
        }
    }
}
