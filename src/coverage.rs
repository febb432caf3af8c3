//! Documentation coverage statistics
//!
//! Counts exported functions per package and how many of them carry a
//! non-empty doc comment. Read-only over the loaded packages.

use crate::loader::PackageMap;
use crate::models::Package;
use serde::Serialize;
use std::collections::HashMap;

/// Coverage of one package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageStat {
    pub documented: usize,
    pub total: usize,
}

impl CoverageStat {
    /// documented / total, or `None` when the package exports no functions
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.documented as f64 / self.total as f64)
        }
    }
}

/// Coverage of a single package
pub fn analyze_package(package: &Package) -> CoverageStat {
    package
        .functions()
        .filter(|f| f.is_exported())
        .fold(CoverageStat::default(), |mut stat, f| {
            stat.total += 1;
            if f.is_documented() {
                stat.documented += 1;
            }
            stat
        })
}

/// Coverage of every package, keyed by package name
pub fn analyze_packages(packages: &PackageMap) -> HashMap<String, CoverageStat> {
    packages
        .iter()
        .map(|(name, package)| (name.clone(), analyze_package(package)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::go::parse_source;
    use std::path::PathBuf;

    fn package(name: &str, sources: &[(&str, &str)]) -> Package {
        let mut pkg = Package::new(name);
        for (path, source) in sources {
            let file = parse_source(source.to_string(), &PathBuf::from(path)).expect("parse");
            pkg.insert(file);
        }
        pkg
    }

    #[test]
    fn test_counts_exported_functions_and_methods() {
        let pkg = package(
            "foo",
            &[
                (
                    "a.go",
                    r#"package foo

// A is documented.
func A() {}

func B() {}

func helper() {}
"#,
                ),
                (
                    "b.go",
                    r#"package foo

type T struct{}

// Do does it.
func (t T) Do() {}

func (t *T) undo() {}
"#,
                ),
            ],
        );

        let stat = analyze_package(&pkg);
        assert_eq!(stat, CoverageStat { documented: 2, total: 3 });
        let ratio = stat.ratio().expect("defined ratio");
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_exported_functions_has_undefined_ratio() {
        let pkg = package("internal", &[("x.go", "package internal\n\nfunc helper() {}\n")]);
        let stat = analyze_package(&pkg);
        assert_eq!(stat.total, 0);
        assert_eq!(stat.ratio(), None);
    }

    #[test]
    fn test_documented_never_exceeds_total() {
        let pkg = package(
            "foo",
            &[(
                "a.go",
                r#"package foo

// helper has a comment but is unexported.
func helper() {}

// A is documented.
func A() {}
"#,
            )],
        );
        let stat = analyze_package(&pkg);
        assert!(stat.documented <= stat.total);
        assert_eq!(stat, CoverageStat { documented: 1, total: 1 });
    }

    #[test]
    fn test_analyze_packages_keys_by_name() {
        let mut packages = PackageMap::new();
        packages.insert("foo".into(), package("foo", &[("a.go", "package foo\n\nfunc A() {}\n")]));
        packages.insert("bar".into(), package("bar", &[("b.go", "package bar\n")]));

        let stats = analyze_packages(&packages);
        assert_eq!(stats["foo"], CoverageStat { documented: 0, total: 1 });
        assert_eq!(stats["foo"].ratio(), Some(0.0));
        assert_eq!(stats["bar"].ratio(), None);
    }
}
