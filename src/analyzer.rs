//! Analysis pipeline: scan, graph, cycles, score, report
//!
//! Each phase consumes the previous phase's output; only an unreadable
//! project root aborts the run.

use crate::config::AnalysisConfig;
use crate::cycles;
use crate::errors::Result;
use crate::graph::ImportGraph;
use crate::models::AnalysisReport;
use crate::report;
use crate::resolver;
use crate::typecheck::TypeErrorCounts;
use std::path::Path;
use tracing::info;

/// Configured analysis pipeline
pub struct Analyzer {
    config: AnalysisConfig,
    type_errors: TypeErrorCounts,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            type_errors: TypeErrorCounts::default(),
        }
    }

    /// Attach external type-checker results to the next run.
    pub fn with_type_errors(mut self, type_errors: TypeErrorCounts) -> Self {
        self.type_errors = type_errors;
        self
    }

    /// Run the full pipeline against a project root.
    pub fn run(&self, root: &Path) -> Result<AnalysisReport> {
        let scan = resolver::scan(root, &self.config)?;
        info!(
            "scanned {} files ({} modules, {} skipped)",
            scan.files,
            scan.modules.len(),
            scan.skipped.len()
        );

        let graph = ImportGraph::build(&scan.modules);
        let cycle_list = cycles::find_cycles(&graph);
        info!(
            "graph has {} nodes, {} edges, {} cycles",
            graph.node_count(),
            graph.edge_count(),
            cycle_list.len()
        );

        Ok(report::build(
            root,
            scan,
            &graph,
            cycle_list,
            &self.type_errors,
            &self.config,
        ))
    }
}
