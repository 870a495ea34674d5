//! Text (terminal) reporter with colors

use crate::models::{AnalysisReport, ModuleReport, RiskTier};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Tier colors (ANSI escape codes)
fn tier_color(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "\x1b[31m", // Red
        RiskTier::High => "\x1b[91m",     // Light red
        RiskTier::Medium => "\x1b[33m",   // Yellow
        RiskTier::Low => "\x1b[32m",      // Green
    }
}

fn tier_tag(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "[C]",
        RiskTier::High => "[H]",
        RiskTier::Medium => "[M]",
        RiskTier::Low => "[L]",
    }
}

fn health_color(score: u32) -> &'static str {
    if score >= 80 {
        "\x1b[32m"
    } else if score >= 60 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport, details: bool) -> Result<String> {
    let mut out = String::new();

    // Header
    let health_c = health_color(report.health_score);
    out.push_str(&format!("\n{BOLD}ImportLens Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Health: {health_c}{BOLD}{}/100{RESET}  ",
        report.health_score
    ));
    out.push_str(&format!(
        "Files: {}  Modules: {}  Imports: {}\n\n",
        report.totals.files, report.totals.modules, report.totals.imports
    ));

    // Tier distribution
    let tc = &report.tier_counts;
    out.push_str(&format!("{BOLD}RISK{RESET} ({} modules)\n", tc.total()));
    let mut parts = Vec::new();
    if tc.critical > 0 {
        parts.push(format!("\x1b[31m{} critical{RESET}", tc.critical));
    }
    if tc.high > 0 {
        parts.push(format!("\x1b[91m{} high{RESET}", tc.high));
    }
    if tc.medium > 0 {
        parts.push(format!("\x1b[33m{} medium{RESET}", tc.medium));
    }
    if tc.low > 0 {
        parts.push(format!("\x1b[32m{} low{RESET}", tc.low));
    }
    if !parts.is_empty() {
        out.push_str(&format!("  {}\n", parts.join(" | ")));
    }
    out.push('\n');

    // Cycles
    if !report.cycles.is_empty() {
        out.push_str(&format!(
            "{BOLD}CYCLES{RESET} ({} found)\n",
            report.cycles.len()
        ));
        for cycle in &report.cycles {
            out.push_str(&format!(
                "  \x1b[31m{} -> {}{RESET}\n",
                cycle.join(" -> "),
                cycle[0]
            ));
        }
        out.push('\n');
    }

    // Action items
    if !report.action_items.is_empty() {
        out.push_str(&format!("{BOLD}ACTION ITEMS{RESET}\n"));
        for item in &report.action_items {
            let c = tier_color(item.priority);
            out.push_str(&format!(
                "  {c}{}{RESET} {}\n",
                tier_tag(item.priority),
                item.message
            ));
        }
        out.push('\n');
    }

    // Module table: top 10 by severity, or everything with --details
    let shown: Vec<&ModuleReport> = if details {
        report.modules.iter().collect()
    } else {
        report.modules.iter().take(10).collect()
    };
    if !shown.is_empty() {
        out.push_str(&format!(
            "{DIM}  TIER  IMPACT  IN/OUT  MODULE{RESET}\n"
        ));
        out.push_str(&format!(
            "{DIM}  ─────────────────────────────────────────────{RESET}\n"
        ));
        for m in &shown {
            let c = tier_color(m.risk_tier);
            out.push_str(&format!(
                "  {c}{}{RESET}   {:>5.1}  {:>2}/{:<2}   {}{}{RESET}\n",
                tier_tag(m.risk_tier),
                m.impact_score,
                m.imported_by_count,
                m.imports_count,
                if m.in_cycle { "\x1b[31m" } else { "" },
                m.name
            ));
            if details {
                out.push_str(&format!("        {DIM}{}{RESET}\n", m.justification));
            }
        }
        let remaining = report.modules.len().saturating_sub(shown.len());
        if remaining > 0 {
            out.push_str(&format!(
                "\n  {DIM}...and {} more (use --details){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    // Skipped files
    if !report.skipped_files.is_empty() {
        out.push_str(&format!(
            "{DIM}Skipped {} file(s):{RESET}\n",
            report.skipped_files.len()
        ));
        for s in &report.skipped_files {
            out.push_str(&format!(
                "  {DIM}{}: {}{RESET}\n",
                s.path.display(),
                s.reason
            ));
        }
        out.push('\n');
    }

    // Where the score went
    if report.health_score == 100 {
        out.push_str(&format!("{DIM}No deductions. Clean dependency graph.{RESET}\n"));
    } else {
        out.push_str(&format!(
            "{DIM}Deductions from 100: {} critical, {} high, {} medium, {} type errors.{RESET}\n",
            tc.critical, tc.high, tc.medium, report.type_error_total
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn summary_contains_health_and_cycles() {
        let out = render(&test_report(), false).unwrap();
        assert!(out.contains("75/100"));
        assert!(out.contains("pkg.core -> pkg.util -> pkg.core"));
        assert!(out.contains("Skipped 1 file(s)"));
    }

    #[test]
    fn details_expand_justifications() {
        let summary = render(&test_report(), false).unwrap();
        let detailed = render(&test_report(), true).unwrap();
        assert!(!summary.contains("standard module"));
        assert!(detailed.contains("standard module"));
    }
}
