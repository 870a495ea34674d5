//! Circular dependency detection using Tarjan's SCC algorithm
//!
//! Finds strongly connected components of the import graph in O(V+E);
//! every SCC with more than one member is reported as one cycle. This
//! guarantees that every module participating in any cycle appears in
//! exactly one reported cycle. Cycles are normalized by rotating to the
//! lexicographically smallest member and deduplicated, so scan order never
//! changes the output.

use crate::graph::ImportGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use rustc_hash::FxHashMap;
use std::collections::HashSet;
use tracing::debug;

/// Find all import cycles in the graph.
///
/// Returns an empty list for acyclic graphs (the expected case). Each
/// cycle is a sequence of two or more module names in import order,
/// starting at the smallest name.
pub fn find_cycles(graph: &ImportGraph) -> Vec<Vec<String>> {
    let names = graph.names();
    if names.is_empty() {
        return Vec::new();
    }

    let mut digraph: DiGraph<(), ()> = DiGraph::new();
    let mut index_of: FxHashMap<&str, petgraph::graph::NodeIndex> = FxHashMap::default();
    for name in names {
        index_of.insert(name.as_str(), digraph.add_node(()));
    }
    for (src, dst) in graph.edges() {
        if let (Some(&a), Some(&b)) = (index_of.get(src), index_of.get(dst)) {
            digraph.add_edge(a, b, ());
        }
    }

    let sccs = tarjan_scc(&digraph);
    debug!("tarjan found {} components", sccs.len());

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();
    for scc in sccs {
        if scc.len() < 2 {
            continue;
        }
        let members: Vec<String> = scc
            .into_iter()
            .map(|idx| names[idx.index()].clone())
            .collect();
        let ordered = order_cycle(members, graph);
        let normalized = normalize_cycle(&ordered);
        if seen.insert(normalized.clone()) {
            cycles.push(normalized);
        }
    }

    cycles.sort();
    cycles
}

/// Walk the SCC along actual import edges so the reported sequence reads
/// as a real chain. Falls back to sorted members if a step has no in-SCC
/// successor left (possible for dense components).
fn order_cycle(mut members: Vec<String>, graph: &ImportGraph) -> Vec<String> {
    members.sort();
    let in_scc: HashSet<&str> = members.iter().map(String::as_str).collect();

    let mut ordered = vec![members[0].clone()];
    let mut used: HashSet<String> = ordered.iter().cloned().collect();
    while ordered.len() < members.len() {
        let current = ordered.last().map(String::as_str).unwrap_or_default();
        let next = graph
            .imports_of(current)
            .iter()
            .find(|t| in_scc.contains(t.as_str()) && !used.contains(t.as_str()));
        match next {
            Some(n) => {
                used.insert(n.clone());
                ordered.push(n.clone());
            }
            None => {
                return members;
            }
        }
    }
    ordered
}

/// Rotate a cycle to start with its lexicographically smallest element so
/// rotations of the same cycle compare equal.
fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    if cycle.is_empty() {
        return Vec::new();
    }

    let min_idx = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| *v)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&cycle[min_idx..]);
    normalized.extend_from_slice(&cycle[..min_idx]);
    normalized
}

/// Names of all modules participating in any cycle
pub fn modules_in_cycles(cycles: &[Vec<String>]) -> HashSet<String> {
    cycles.iter().flatten().cloned().collect()
}
