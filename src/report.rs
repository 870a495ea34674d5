//! Report assembly: health score and prioritized action items
//!
//! The health score is a pure function of the tier distribution and the
//! external type-error count; it is computed from scratch on every build,
//! never adjusted incrementally.

use crate::config::{AnalysisConfig, Penalties};
use crate::cycles;
use crate::graph::ImportGraph;
use crate::models::{
    ActionItem, ActionKind, AnalysisReport, ModuleReport, RiskTier, TierCounts, Totals,
};
use crate::resolver::ScanOutcome;
use crate::scoring;
use crate::typecheck::TypeErrorCounts;
use chrono::Utc;
use std::path::Path;

/// Modules flagged by the docstring quick-win heuristic: big enough, busy
/// enough, or depended upon at all.
const QUICK_WIN_LOC: usize = 100;
const QUICK_WIN_FAN_OUT: usize = 5;

/// Project health in 0..=100: start at 100, deduct per risky module and
/// per external type error, clamp.
pub fn health_score(tiers: &TierCounts, type_errors: usize, penalties: &Penalties) -> u32 {
    let deduction = tiers.critical as i64 * penalties.critical as i64
        + tiers.high as i64 * penalties.high as i64
        + tiers.medium as i64 * penalties.medium as i64
        + type_errors as i64 * penalties.type_error as i64;
    (100 - deduction).clamp(0, 100) as u32
}

/// Assemble the full report from the completed analysis phases.
pub fn build(
    root: &Path,
    scan: ScanOutcome,
    graph: &ImportGraph,
    cycle_list: Vec<Vec<String>>,
    type_errors: &TypeErrorCounts,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let cyclic = cycles::modules_in_cycles(&cycle_list);

    let mut modules: Vec<ModuleReport> = scan
        .modules
        .iter()
        .map(|m| {
            let fan_in = graph.fan_in(&m.name);
            let fan_out = graph.fan_out(&m.name);
            let impact = scoring::impact_score(fan_in, fan_out, m.loc);
            let in_cycle = cyclic.contains(&m.name);
            ModuleReport {
                name: m.name.clone(),
                file_path: m.path.clone(),
                loc: m.loc,
                imports_count: fan_out,
                imported_by_count: fan_in,
                imports: graph.imports_of(&m.name).to_vec(),
                impact_score: impact,
                risk_tier: scoring::classify(fan_in, fan_out, impact, &config.thresholds),
                in_cycle,
                has_docstring: m.has_docstring,
                type_errors: type_errors.for_module(&m.name),
                justification: scoring::justification(fan_in, fan_out, in_cycle, &config.thresholds),
            }
        })
        .collect();

    // Severity first, then impact, then name: deterministic detail order
    modules.sort_by(|a, b| {
        b.risk_tier
            .cmp(&a.risk_tier)
            .then_with(|| b.impact_score.total_cmp(&a.impact_score))
            .then_with(|| a.name.cmp(&b.name))
    });

    let tier_counts = TierCounts::from_reports(&modules);
    let type_error_total = type_errors.total();
    let action_items = action_items(&modules, &cycle_list, type_error_total);

    AnalysisReport {
        generated_at: Utc::now(),
        project_analyzed: root.to_path_buf(),
        totals: Totals {
            files: scan.files,
            modules: modules.len(),
            imports: graph.edge_count(),
        },
        tier_counts,
        health_score: health_score(&tier_counts, type_error_total, &config.penalties),
        cycles: cycle_list,
        action_items,
        modules,
        skipped_files: scan.skipped,
        type_error_total,
    }
}

/// Build the prioritized action list: cycles (or an explicit all-clear),
/// type errors, CRITICAL refactors, then the docstring quick win.
fn action_items(
    modules: &[ModuleReport],
    cycle_list: &[Vec<String>],
    type_error_total: usize,
) -> Vec<ActionItem> {
    let mut items = Vec::new();

    if cycle_list.is_empty() {
        items.push(ActionItem {
            kind: ActionKind::NoCircularDependencies,
            priority: RiskTier::Low,
            message: "no circular dependencies detected".to_string(),
        });
    } else {
        for cycle in cycle_list {
            items.push(ActionItem {
                kind: ActionKind::CircularDependencies,
                priority: RiskTier::Critical,
                message: format!(
                    "break the import cycle {} -> {}",
                    cycle.join(" -> "),
                    cycle[0]
                ),
            });
        }
    }

    if type_error_total > 0 {
        let worst = modules.iter().max_by_key(|m| m.type_errors);
        let message = match worst {
            Some(m) if m.type_errors > 0 => format!(
                "{} type-checker errors reported; worst offender is {} ({})",
                type_error_total, m.name, m.type_errors
            ),
            _ => format!("{type_error_total} type-checker errors reported"),
        };
        items.push(ActionItem {
            kind: ActionKind::TypeErrors,
            priority: RiskTier::High,
            message,
        });
    }

    for m in modules.iter().filter(|m| m.risk_tier == RiskTier::Critical) {
        items.push(ActionItem {
            kind: ActionKind::RefactorCritical,
            priority: RiskTier::Critical,
            message: format!("refactor {}: {}", m.name, m.justification),
        });
    }

    let undocumented = modules
        .iter()
        .filter(|m| {
            !m.has_docstring
                && (m.loc > QUICK_WIN_LOC
                    || m.imports_count > QUICK_WIN_FAN_OUT
                    || m.imported_by_count > 0)
        })
        .count();
    if undocumented > 0 {
        items.push(ActionItem {
            kind: ActionKind::QuickWinDocstrings,
            priority: RiskTier::Medium,
            message: format!(
                "quick win: {undocumented} modules likely missing a docstring"
            ),
        });
    }

    items
}
