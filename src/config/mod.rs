//! Configuration module for docdr
//!
//! This module handles:
//! - Project-level configuration (docdr.toml)
//! - User-level configuration (~/.config/docdr/config.toml)
//! - Editor selection

mod project_config;
mod user_config;

pub use project_config::{
    glob_match, load_project_config, EditorConfig, ExcludeConfig, ProjectConfig, ScanConfig,
    CONFIG_FILE_NAMES,
};
pub use user_config::UserConfig;

use std::path::Path;

/// Environment variable naming the editor program
pub const EDITOR_ENV: &str = "EDITOR";

/// Combined project and user configuration for one run
#[derive(Debug, Default)]
pub struct Settings {
    pub project: ProjectConfig,
    pub user: UserConfig,
}

impl Settings {
    /// Load project config from `root` and the user config from the home directory
    pub fn load(root: &Path) -> Self {
        Self {
            project: load_project_config(root),
            user: UserConfig::load(),
        }
    }

    /// Editor command line: `$EDITOR`, then docdr.toml, then the user config
    pub fn editor_command(&self) -> Option<String> {
        self.editor_command_with(std::env::var(EDITOR_ENV).ok().as_deref())
    }

    fn editor_command_with(&self, env: Option<&str>) -> Option<String> {
        env.filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.project.editor.command.clone())
            .or_else(|| self.user.editor.command.clone())
            .filter(|v| !v.trim().is_empty())
    }
}
