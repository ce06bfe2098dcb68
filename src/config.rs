//! Configuration loaded from `~/.config/zcalc/config.toml`.
//!
//! ```toml
//! [format]
//! group_separator = " "
//!
//! [keys]
//! "x" = "multiply"
//! "ctrl+z" = "backspace"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::calculator::{Input, NumberFormat};
use crate::input::Keymap;

/// User configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: NumberFormat,
    /// Extra or replacement key bindings, key name to action name.
    pub keys: HashMap<String, Input>,
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path when `None`.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let separator = self.format.group_separator;
        if !NumberFormat::is_valid_separator(separator) {
            bail!("group_separator {:?} can be confused with part of a number", separator);
        }
        if self.keys.keys().any(|key| key.trim().is_empty()) {
            bail!("key bindings must not use an empty key name");
        }
        Ok(())
    }

    /// Build the keymap with this config's overrides applied.
    pub fn keymap(&self) -> Keymap {
        Keymap::with_overrides(&self.keys)
    }
}
