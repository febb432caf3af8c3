//! JSON reporter
//!
//! Outputs the ranked rows as a pretty-printed JSON array. Undefined
//! coverage is `null`.

use super::RankedPackage;
use anyhow::Result;

/// Render ranked rows as JSON
pub fn render(rows: &[RankedPackage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
