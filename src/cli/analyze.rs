//! Analyze command - run the pipeline and render the report

use crate::analyzer::Analyzer;
use crate::config::AnalysisConfig;
use crate::errors::AnalysisError;
use crate::reporters::{self, OutputFormat};
use crate::typecheck::TypeErrorCounts;
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap()
}

#[allow(clippy::too_many_arguments)]
pub(super) fn run(
    path: &Path,
    format: &str,
    output_path: Option<&Path>,
    config_path: Option<&Path>,
    type_errors_path: Option<&Path>,
    extra_excludes: Vec<String>,
    details: bool,
    workers: usize,
) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    let format = OutputFormat::from_str(format)?;

    let mut config = AnalysisConfig::load(&root, config_path)?;
    config.exclude.paths.extend(extra_excludes);

    let mut analyzer = Analyzer::new(config);
    if let Some(te_path) = type_errors_path {
        analyzer = analyzer.with_type_errors(TypeErrorCounts::load(te_path)?);
    }

    // Bound the parse phase to the requested worker count
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build worker thread pool")?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Analyzing {}...", root.display()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let report = pool.install(|| analyzer.run(&root));
    spinner.finish_and_clear();
    let report = report?;

    let rendered = reporters::render(&report, format, details)?;

    if let Some(out_path) = output_path {
        let out_path = resolve_output_path(out_path, format);
        std::fs::write(&out_path, &rendered).map_err(|source| AnalysisError::Export {
            format: format.to_string(),
            path: out_path.clone(),
            source,
        })?;
        // stderr keeps stdout clean for machine-readable formats
        eprintln!(
            "Report written to: {}",
            style(out_path.display()).cyan()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// An extensionless `--output` path gets the format's recommended extension
fn resolve_output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(reporters::file_extension(format))
    }
}
