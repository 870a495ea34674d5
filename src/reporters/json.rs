//! JSON reporter
//!
//! Outputs the full AnalysisReport as pretty-printed JSON, and reads it
//! back so downstream consumers can reload saved reports.

use crate::models::AnalysisReport;
use anyhow::{Context, Result};

/// Render report as pretty-printed JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a report previously produced by [`render`].
pub fn from_json(text: &str) -> Result<AnalysisReport> {
    serde_json::from_str(text).context("invalid analysis report JSON")
}
