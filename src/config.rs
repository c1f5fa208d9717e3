use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;

/// Everything the synchronizer recognizes about a host page: the theme
/// marker classes on the document root, the naming convention for themed
/// image assets, and the plot background palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_light_class")]
    pub light_class: String,

    #[serde(default = "default_dark_class")]
    pub dark_class: String,

    #[serde(default = "default_light_marker")]
    pub light_marker: String,

    #[serde(default = "default_dark_marker")]
    pub dark_marker: String,

    #[serde(default = "default_plot_light_color")]
    pub plot_light_color: String,

    #[serde(default = "default_plot_dark_color")]
    pub plot_dark_color: String,
}

fn default_light_class() -> String {
    "quarto-light".to_string()
}

fn default_dark_class() -> String {
    "quarto-dark".to_string()
}

fn default_light_marker() -> String {
    ".light".to_string()
}

fn default_dark_marker() -> String {
    ".dark".to_string()
}

fn default_plot_light_color() -> String {
    "rgb(255, 241, 229)".to_string()
}

fn default_plot_dark_color() -> String {
    "rgb(34, 34, 34)".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            light_class: default_light_class(),
            dark_class: default_dark_class(),
            light_marker: default_light_marker(),
            dark_marker: default_dark_marker(),
            plot_light_color: default_plot_light_color(),
            plot_dark_color: default_plot_dark_color(),
        }
    }
}

impl SyncConfig {
    /// Load the config from disk, or fall back to defaults if not exists
    pub fn load() -> Self {
        let config_path = Self::config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse config: {}; using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Read and parse a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Serialize to pretty JSON and write to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("themesync");
        path.push("config.json");
        path
    }
}
