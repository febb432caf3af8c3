//! Output reporters for coverage results
//!
//! Supports multiple output formats:
//! - `text` - Tab-separated lines: total, ratio, package
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::coverage::CoverageStat;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One row of the coverage report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPackage {
    pub package: String,
    pub documented: usize,
    pub total: usize,
    /// `None` when the package exports no functions
    pub coverage: Option<f64>,
}

/// Order packages by coverage, highest first.
///
/// Packages with an undefined ratio sort after every defined one. Equal
/// ratios fall back to the package name so output never depends on map
/// iteration order.
pub fn rank(stats: &HashMap<String, CoverageStat>) -> Vec<RankedPackage> {
    let mut rows: Vec<RankedPackage> = stats
        .iter()
        .map(|(name, stat)| RankedPackage {
            package: name.clone(),
            documented: stat.documented,
            total: stat.total,
            coverage: stat.ratio(),
        })
        .collect();

    rows.sort_by(|a, b| {
        compare_coverage(a.coverage, b.coverage).then_with(|| a.package.cmp(&b.package))
    });
    rows
}

fn compare_coverage(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Render a coverage report in the specified format
pub fn report(stats: &HashMap<String, CoverageStat>, format: OutputFormat) -> Result<String> {
    let rows = rank(stats);
    match format {
        OutputFormat::Text => text::render(&rows),
        OutputFormat::Json => json::render(&rows),
    }
}
