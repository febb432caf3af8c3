//! Init command - write a docdr.toml with example settings

use anyhow::{Context, Result};
use console::style;
use docdr::config::CONFIG_FILE_NAMES;
use std::path::Path;

const TEMPLATE: &str = r#"# docdr configuration

[exclude]
# Glob patterns, relative to this directory, that are never scanned
paths = [
    # "**/testdata/**",
    # "vendor/",
]

[scan]
# Skip *_test.go files
skip_tests = false

# Honour .gitignore and skip hidden files and directories
respect_gitignore = false

[editor]
# Used for [e] edit and [o] open when $EDITOR is not set
# command = "vim"
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, TEMPLATE)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Show coverage", style("docdr run .").cyan());
    println!("  {} Document a package", style("docdr run . <package>").cyan());

    Ok(())
}
