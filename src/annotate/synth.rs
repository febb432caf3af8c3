//! Comment synthesis
//!
//! Turns operator-supplied text into Go line comments.

use regex::Regex;
use std::sync::OnceLock;

/// Go line-comment marker
pub const COMMENT_MARKER: &str = "//";

fn comment_line_pattern() -> &'static Regex {
    static COMMENT_LINE: OnceLock<Regex> = OnceLock::new();
    COMMENT_LINE.get_or_init(|| Regex::new(r"^\s*//").expect("valid regex"))
}

/// Normalize raw text into comment lines.
///
/// Lines already starting with `//` (after optional whitespace) are kept
/// without surrounding whitespace (the renderer applies the declaration's
/// indent); other lines get a `// ` prefix and blank lines become a bare
/// `//`. Leading and trailing blank lines are dropped. Returns `None` when
/// nothing but whitespace remains.
pub fn synthesize(raw: &str) -> Option<Vec<String>> {
    let mut lines: Vec<&str> = raw.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let first = lines.iter().position(|l| !l.trim().is_empty())?;

    Some(lines[first..].iter().map(|line| prefix_line(line)).collect())
}

fn prefix_line(line: &str) -> String {
    if comment_line_pattern().is_match(line) {
        line.trim().to_string()
    } else if line.trim().is_empty() {
        COMMENT_MARKER.to_string()
    } else {
        format!("{} {}", COMMENT_MARKER, line.trim_end())
    }
}
