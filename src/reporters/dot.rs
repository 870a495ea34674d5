//! Graphviz DOT reporter
//!
//! Emits the import graph as a directed graph, one edge per line, with
//! nodes filled by risk tier and cycle edges highlighted in red.

use crate::models::{AnalysisReport, RiskTier};
use anyhow::Result;
use rustc_hash::FxHashSet;
use std::fmt::Write;

fn tier_style(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "fillcolor=red, fontcolor=white",
        RiskTier::High => "fillcolor=orange, fontcolor=black",
        RiskTier::Medium => "fillcolor=yellow, fontcolor=black",
        RiskTier::Low => "fillcolor=lightgreen, fontcolor=black",
    }
}

/// Graphviz identifiers cannot contain dots or dashes
fn node_id(name: &str) -> String {
    name.replace(['.', '-'], "_")
}

/// Render report as a Graphviz DOT document
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "digraph importlens {{")?;
    writeln!(out, "    rankdir=TB;")?;
    writeln!(out, "    node [shape=box, style=filled];")?;
    writeln!(out)?;

    for m in &report.modules {
        writeln!(
            out,
            "    {} [label=\"{}\\n({}->{})\", {}];",
            node_id(&m.name),
            m.name,
            m.imports_count,
            m.imported_by_count,
            tier_style(m.risk_tier)
        )?;
    }
    writeln!(out)?;

    // Edges that close a cycle get drawn in red
    let cycle_edges = cycle_edge_set(&report.cycles);
    for m in &report.modules {
        for target in &m.imports {
            if cycle_edges.contains(&(m.name.as_str(), target.as_str())) {
                writeln!(
                    out,
                    "    {} -> {} [color=red, penwidth=2.0];",
                    node_id(&m.name),
                    node_id(target)
                )?;
            } else {
                writeln!(out, "    {} -> {};", node_id(&m.name), node_id(target))?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "    subgraph cluster_legend {{")?;
    writeln!(out, "        label=\"Risk Tiers\";")?;
    writeln!(out, "        style=dashed;")?;
    for tier in [
        RiskTier::Critical,
        RiskTier::High,
        RiskTier::Medium,
        RiskTier::Low,
    ] {
        writeln!(
            out,
            "        legend_{} [label=\"{}\", {}];",
            tier.to_string().to_lowercase(),
            tier,
            tier_style(tier)
        )?;
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    Ok(out)
}

/// Collect directed (from, to) pairs that lie on a reported cycle,
/// including the wrap-around edge back to the cycle head.
fn cycle_edge_set(cycles: &[Vec<String>]) -> FxHashSet<(&str, &str)> {
    let mut edges = FxHashSet::default();
    for cycle in cycles {
        for (i, from) in cycle.iter().enumerate() {
            let to = &cycle[(i + 1) % cycle.len()];
            edges.insert((from.as_str(), to.as_str()));
        }
    }
    edges
}
