//! ImportLens - import-graph risk analysis for Python projects
//!
//! Scans a project root, resolves local imports into a directed module
//! graph, detects cycles, scores each module's architectural impact, and
//! classifies modules into risk tiers behind a 0-100 health score.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod cycles;
pub mod errors;
pub mod graph;
pub mod models;
pub mod parsers;
pub mod report;
pub mod reporters;
pub mod resolver;
pub mod scoring;
pub mod typecheck;
