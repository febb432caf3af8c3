//! Text reporter
//!
//! One line per package: `\t<total>\t<ratio>\t<package>`, ratio with six
//! decimals. Packages without exported functions show a placeholder ratio.

use super::RankedPackage;
use anyhow::Result;

/// Shown instead of a ratio when a package exports no functions
pub const UNDEFINED_RATIO: &str = "-";

/// Render ranked rows as tab-separated lines
pub fn render(rows: &[RankedPackage]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        let ratio = match row.coverage {
            Some(r) => format!("{:.6}", r),
            None => UNDEFINED_RATIO.to_string(),
        };
        out.push_str(&format!("\t{}\t{}\t{}\n", row.total, ratio, row.package));
    }
    Ok(out)
}
