//! Output reporters for analysis reports
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `csv` - Spreadsheet rows with a metadata header block
//! - `dot` - Graphviz directed graph of the import structure

mod csv;
mod dot;
mod json;
mod text;

pub use json::from_json;

use crate::models::AnalysisReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Dot,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, csv, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Render an analysis report in the given format.
///
/// `details` only affects the text format, which expands the per-module
/// table; the machine formats always carry everything.
pub fn render(report: &AnalysisReport, format: OutputFormat, details: bool) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, details),
        OutputFormat::Json => json::render(report),
        OutputFormat::Csv => csv::render(report),
        OutputFormat::Dot => dot::render(report),
    }
}

/// Recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Dot => "dot",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a small but fully-populated report for reporter tests
    pub(crate) fn test_report() -> AnalysisReport {
        use crate::models::{
            ActionItem, ActionKind, ModuleReport, RiskTier, SkippedFile, TierCounts, Totals,
        };

        let module = |name: &str, tier, fan_in, fan_out, imports: &[&str]| ModuleReport {
            name: name.into(),
            file_path: format!("{}.py", name.replace('.', "/")).into(),
            loc: 120,
            imports_count: fan_out,
            imported_by_count: fan_in,
            imports: imports.iter().map(|s| s.to_string()).collect(),
            impact_score: (fan_in * 10 + fan_out * 2) as f64,
            risk_tier: tier,
            in_cycle: false,
            has_docstring: true,
            type_errors: 0,
            justification: "standard module".into(),
        };

        let mut core = module("pkg.core", RiskTier::Critical, 6, 1, &["pkg.util"]);
        core.in_cycle = true;
        let mut util = module("pkg.util", RiskTier::Medium, 1, 1, &["pkg.core"]);
        util.in_cycle = true;
        let leaf = module("pkg.leaf", RiskTier::Low, 0, 0, &[]);
        let modules = vec![core, util, leaf];

        AnalysisReport {
            generated_at: chrono::Utc::now(),
            project_analyzed: "/tmp/project".into(),
            totals: Totals {
                files: 4,
                modules: 3,
                imports: 2,
            },
            tier_counts: TierCounts::from_reports(&modules),
            health_score: 75,
            cycles: vec![vec!["pkg.core".into(), "pkg.util".into()]],
            action_items: vec![ActionItem {
                kind: ActionKind::CircularDependencies,
                priority: RiskTier::Critical,
                message: "break the import cycle pkg.core -> pkg.util -> pkg.core".into(),
            }],
            modules,
            skipped_files: vec![SkippedFile {
                path: "pkg/broken.py".into(),
                reason: "syntax error".into(),
            }],
            type_error_total: 0,
        }
    }

    #[test]
    fn format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str("graphviz").unwrap(),
            OutputFormat::Dot
        );
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(file_extension(OutputFormat::Json), "json");
        assert_eq!(file_extension(OutputFormat::Dot), "dot");
    }
}
