//! Directed import graph
//!
//! Purely structural: no scores, no cycle logic. Both forward and reverse
//! adjacency are built so neighbor and imported-by lookups are O(1), and
//! fan-in is always derived from the reverse map rather than stored.

use crate::models::Module;
use rustc_hash::FxHashMap;

/// Import graph keyed by module name
#[derive(Debug, Default)]
pub struct ImportGraph {
    /// module -> modules it imports
    forward: FxHashMap<String, Vec<String>>,
    /// module -> modules importing it
    reverse: FxHashMap<String, Vec<String>>,
    /// Node names in sorted order
    names: Vec<String>,
    edge_count: usize,
}

impl ImportGraph {
    /// Build the graph from scanned modules.
    ///
    /// Every edge endpoint must be a scanned module; imports naming unknown
    /// modules are dropped here as a last line of defense (the resolver
    /// already filters them). Self-edges are never retained.
    pub fn build(modules: &[Module]) -> Self {
        let mut graph = Self::default();
        graph.names = modules.iter().map(|m| m.name.clone()).collect();
        graph.names.sort();

        for m in modules {
            graph.forward.entry(m.name.clone()).or_default();
            graph.reverse.entry(m.name.clone()).or_default();
        }

        for m in modules {
            for target in &m.imports {
                if target == &m.name || !graph.reverse.contains_key(target) {
                    continue;
                }
                if let Some(out) = graph.forward.get_mut(&m.name) {
                    out.push(target.clone());
                }
                if let Some(inc) = graph.reverse.get_mut(target) {
                    inc.push(m.name.clone());
                }
            }
        }

        for adj in graph.forward.values_mut().chain(graph.reverse.values_mut()) {
            adj.sort();
            adj.dedup();
        }
        graph.edge_count = graph.forward.values().map(|v| v.len()).sum();

        graph
    }

    /// Modules this module imports
    pub fn imports_of(&self, name: &str) -> &[String] {
        self.forward.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Modules importing this module
    pub fn imported_by(&self, name: &str) -> &[String] {
        self.reverse.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fan-out: distinct modules imported
    pub fn fan_out(&self, name: &str) -> usize {
        self.imports_of(name).len()
    }

    /// Fan-in: distinct importers, derived from the reverse map
    pub fn fan_in(&self, name: &str) -> usize {
        self.imported_by(name).len()
    }

    /// All node names, sorted
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All edges as (importer, imported) pairs in deterministic order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().flat_map(move |name| {
            self.imports_of(name)
                .iter()
                .map(move |target| (name.as_str(), target.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn module(name: &str, imports: &[&str]) -> Module {
        Module {
            name: name.to_string(),
            path: PathBuf::from(format!("{}.py", name.replace('.', "/"))),
            loc: 10,
            has_docstring: true,
            imports: imports.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn forward_and_reverse_stay_consistent() {
        let modules = vec![
            module("a", &["b", "c"]),
            module("b", &["c"]),
            module("c", &[]),
        ];
        let graph = ImportGraph::build(&modules);

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.imports_of("a"), &["b", "c"]);
        assert_eq!(graph.imported_by("c"), &["a", "b"]);

        // Invariant: fan-in re-derived from the edge set matches the
        // reverse map for every node
        for name in graph.names() {
            let derived = graph
                .edges()
                .filter(|(_, target)| target == name)
                .count();
            assert_eq!(graph.fan_in(name), derived);
        }
    }

    #[test]
    fn self_and_dangling_edges_are_dropped() {
        let modules = vec![module("a", &["a", "ghost", "b"]), module("b", &[])];
        let graph = ImportGraph::build(&modules);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.imports_of("a"), &["b"]);
        assert_eq!(graph.fan_in("a"), 0);
    }

    #[test]
    fn duplicate_imports_collapse_to_one_edge() {
        let modules = vec![module("a", &["b", "b"]), module("b", &[])];
        let graph = ImportGraph::build(&modules);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.fan_in("b"), 1);
    }

    #[test]
    fn unknown_module_lookups_are_empty() {
        let graph = ImportGraph::build(&[module("a", &[])]);
        assert!(graph.imports_of("nope").is_empty());
        assert_eq!(graph.fan_in("nope"), 0);
    }
}
