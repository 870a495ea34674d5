//! Core data models for importlens
//!
//! These models are shared across the resolver, graph, scoring, and
//! reporting layers, and form the serialized report surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Risk tier for a module
///
/// Ordered so that comparisons follow severity: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
            RiskTier::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single scanned source module
///
/// Produced once per file during a scan and immutable afterwards; a new
/// analysis run produces a fresh set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Dotted logical name, unique per project root (e.g. `pkg.sub.mod`)
    pub name: String,
    /// Path relative to the project root
    pub path: PathBuf,
    /// Line count of the source file
    pub loc: usize,
    /// Whether the module carries a top-level docstring
    pub has_docstring: bool,
    /// Local modules this module imports (resolved, deduplicated, sorted)
    pub imports: Vec<String>,
}

/// Per-module entry in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    pub name: String,
    pub file_path: PathBuf,
    pub loc: usize,
    pub imports_count: usize,
    pub imported_by_count: usize,
    /// Resolved local imports, the outgoing edges of this module
    pub imports: Vec<String>,
    pub impact_score: f64,
    pub risk_tier: RiskTier,
    /// Whether the module participates in an import cycle
    pub in_cycle: bool,
    pub has_docstring: bool,
    /// External type-checker errors attributed to this module
    pub type_errors: usize,
    /// Human-readable explanation of the assigned tier
    pub justification: String,
}

/// Count of modules per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn from_reports(reports: &[ModuleReport]) -> Self {
        let mut counts = Self::default();
        for r in reports {
            match r.risk_tier {
                RiskTier::Critical => counts.critical += 1,
                RiskTier::High => counts.high += 1,
                RiskTier::Medium => counts.medium += 1,
                RiskTier::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Scan-level totals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Source files discovered (including skipped ones)
    pub files: usize,
    /// Modules that made it into the graph
    pub modules: usize,
    /// Import edges between local modules
    pub imports: usize,
}

/// A file excluded from the graph because it could not be parsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Category of a prioritized action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CircularDependencies,
    NoCircularDependencies,
    TypeErrors,
    RefactorCritical,
    QuickWinDocstrings,
}

/// One entry in the prioritized action list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub kind: ActionKind,
    pub priority: RiskTier,
    pub message: String,
}

/// Complete analysis report
///
/// Plain data: consumers never need to re-enter the analyzer to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub project_analyzed: PathBuf,
    pub totals: Totals,
    pub tier_counts: TierCounts,
    /// Project health, 0-100
    pub health_score: u32,
    /// Import cycles, each rotated to start at its smallest member
    pub cycles: Vec<Vec<String>>,
    pub action_items: Vec<ActionItem>,
    /// Per-module detail, sorted by tier severity then impact score
    pub modules: Vec<ModuleReport>,
    pub skipped_files: Vec<SkippedFile>,
    pub type_error_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_follows_severity() {
        assert!(RiskTier::Critical > RiskTier::High);
        assert!(RiskTier::High > RiskTier::Medium);
        assert!(RiskTier::Medium > RiskTier::Low);
    }

    #[test]
    fn tier_serializes_uppercase() {
        let json = serde_json::to_string(&RiskTier::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        let back: RiskTier = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(back, RiskTier::Medium);
    }

    #[test]
    fn tier_counts_from_reports() {
        let mk = |tier| ModuleReport {
            name: "m".into(),
            file_path: "m.py".into(),
            loc: 10,
            imports_count: 0,
            imported_by_count: 0,
            imports: Vec::new(),
            impact_score: 0.0,
            risk_tier: tier,
            in_cycle: false,
            has_docstring: true,
            type_errors: 0,
            justification: String::new(),
        };
        let reports = vec![
            mk(RiskTier::Critical),
            mk(RiskTier::Low),
            mk(RiskTier::Low),
            mk(RiskTier::High),
        ];
        let counts = TierCounts::from_reports(&reports);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.medium, 0);
        assert_eq!(counts.low, 2);
        assert_eq!(counts.total(), 4);
    }
}
