//! Source code parsers using tree-sitter
//!
//! Only Go is supported. The parser keeps the file's bytes so the writer can
//! reproduce them exactly.

pub mod go;

use std::path::Path;

/// File extension of parseable sources
pub const SOURCE_EXTENSION: &str = "go";

/// Whether a path names a Go source file
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Whether a path names a Go test file (`*_test.go`)
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_detection() {
        assert!(is_source_file(Path::new("pkg/foo.go")));
        assert!(!is_source_file(Path::new("pkg/foo.go.orig")));
        assert!(!is_source_file(Path::new("pkg/go")));
        assert!(is_test_file(Path::new("pkg/foo_test.go")));
        assert!(!is_test_file(Path::new("pkg/foo.go")));
    }
}
