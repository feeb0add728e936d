//! Optional TOML configuration supplying CLI defaults.

use crate::error::{DirgrepError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchDefaults,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Extension rules applied when the CLI gives none. Empty means no
    /// filtering.
    pub default_extensions: Vec<String>,
    pub ignore_case: bool,
    pub regex: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_extensions: vec![],
            // Matches the engine's historical default of case-insensitive
            // searching.
            ignore_case: true,
            regex: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::find_config_path() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| {
                DirgrepError::Config(format!("failed to parse {}: {e}", path.display()))
            })
        } else {
            Ok(Self::default())
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("dirgrep/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }
        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".dirgrep.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }
        let current_path = Path::new(".dirgrep.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }
        None
    }
}
