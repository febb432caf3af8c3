//! User-level configuration for docdr
//!
//! Supports loading config from ~/.config/docdr/config.toml

use super::EditorConfig;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub editor: EditorConfig,
}

impl UserConfig {
    /// Load the user config, falling back to defaults when absent or unreadable
    pub fn load() -> Self {
        Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| match Self::load_from(&p) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", p.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docdr").join("config.toml"))
    }
}
