//! Source tree loading
//!
//! Walks a directory, parses every Go file and groups the files by the name
//! in their `package` clause. Directory layout plays no part in grouping.

use crate::config::ProjectConfig;
use crate::error::{DocResult, DocdrError};
use crate::models::Package;
use crate::parsers::{self, go};
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Packages keyed by name. Unordered; callers sort before output.
pub type PackageMap = HashMap<String, Package>;

/// Walk `root` and parse every Go source file into its package.
///
/// The first walk or parse failure aborts the load; no partial map is
/// returned.
pub fn load_packages(root: &Path, config: &ProjectConfig) -> DocResult<PackageMap> {
    let mut packages = PackageMap::new();
    let mut parsed = 0usize;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    if config.scan.respect_gitignore {
        builder
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false);
    }

    for entry in builder.build() {
        let entry = entry.map_err(|source| DocdrError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !parsers::is_source_file(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.should_exclude(relative) {
            debug!("Excluded {}", relative.display());
            continue;
        }
        if config.scan.skip_tests && parsers::is_test_file(path) {
            debug!("Skipping test file {}", relative.display());
            continue;
        }

        let file = go::parse_file(path)?;
        debug!("Parsed {} (package {})", path.display(), file.package_name);
        parsed += 1;

        packages
            .entry(file.package_name.clone())
            .or_insert_with(|| Package::new(file.package_name.clone()))
            .insert(file);
    }

    info!(
        "Loaded {} files into {} packages from {}",
        parsed,
        packages.len(),
        root.display()
    );

    Ok(packages)
}
