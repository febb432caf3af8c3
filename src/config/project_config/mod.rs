//! Project-level configuration support
//!
//! Loads per-project configuration from `docdr.toml` or `.docdrrc.json`
//! in the scanned directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # docdr.toml
//!
//! [exclude]
//! paths = ["**/testdata/**", "internal/gen/"]
//!
//! [scan]
//! skip_tests = false
//! respect_gitignore = false
//!
//! [editor]
//! command = "vim"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Project configuration file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["docdr.toml", ".docdrrc.json"];

/// Project-level configuration loaded from docdr.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Source walking options
    #[serde(default)]
    pub scan: ScanConfig,

    /// Editor used for the edit and open actions
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Paths/patterns to exclude, relative to the scanned directory
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Source walking options
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScanConfig {
    /// Skip `*_test.go` files
    #[serde(default)]
    pub skip_tests: bool,

    /// Honour .gitignore and skip hidden entries
    #[serde(default)]
    pub respect_gitignore: bool,
}

/// Editor selection
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Command line of the editor, e.g. `"code --wait"`
    #[serde(default)]
    pub command: Option<String>,
}

/// Load project configuration from the scanned directory.
///
/// Searches for `docdr.toml` first, then `.docdrrc.json`. A file that
/// fails to parse is reported and skipped. Returns the default
/// configuration if no usable file is found.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let toml_path = root.join(CONFIG_FILE_NAMES[0]);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = root.join(CONFIG_FILE_NAMES[1]);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl ProjectConfig {
    /// Check if a path (relative to the scanned directory) should be excluded
    pub fn should_exclude(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");
        self.exclude
            .paths
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Simple glob pattern matching
pub fn glob_match(pattern: &str, path: &str) -> bool {
    // **/X/** matches X as any directory component
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle))
            || path.starts_with(&format!("{}/", middle));
    }

    if pattern.contains("**") {
        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if !prefix.is_empty() && !path.starts_with(prefix) {
                return false;
            }

            // **/*_gen.go style suffixes
            if let Some((before, after)) = suffix.split_once('*') {
                return path.ends_with(after)
                    && (before.is_empty() || path.contains(before));
            }
            return suffix.is_empty() || path.ends_with(suffix);
        }
    }

    if let Some((prefix, suffix)) = pattern.split_once('*') {
        if !suffix.contains('*') {
            return path.starts_with(prefix) && path.ends_with(suffix);
        }
    }

    // "vendor/" only matches "vendor/x.go", not "src/vendor/x.go"
    path.starts_with(pattern) || path == pattern
}
