//! CLI command definitions and handlers

mod analyze;
mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// ImportLens - dependency graph analysis for Python projects
#[derive(Parser, Debug)]
#[command(name = "importlens")]
#[command(
    version,
    about = "Import-graph risk analysis — find cycles, high-impact modules, and architectural hotspots in Python codebases",
    long_about = "ImportLens scans a Python project, resolves its local imports into a \
directed module graph, detects import cycles, and classifies every module into a \
CRITICAL/HIGH/MEDIUM/LOW risk tier with an overall 0-100 health score.\n\n\
Run without a subcommand to analyze the current directory:\n  \
importlens .",
    after_help = "\
Examples:
  importlens .                         Analyze current directory
  importlens analyze . --format json   JSON output for scripting
  importlens analyze . -f dot -o deps.dot   Graphviz export
  importlens analyze . --details       Full per-module breakdown
  importlens init                      Write a commented importlens.toml"
)]
pub struct Cli {
    /// Path to project root (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an importlens.toml config file with example settings
    Init,

    /// Analyze a project's import graph
    #[command(after_help = "\
Examples:
  importlens analyze .                          Terminal summary
  importlens analyze . --format json            Full report as JSON
  importlens analyze . --format csv -o deps.csv Spreadsheet export
  importlens analyze . --format dot -o deps.dot Graphviz export
  importlens analyze . --type-errors mypy.json  Fold type-checker errors into the score
  importlens analyze . --config custom.toml     Custom risk thresholds")]
    Analyze {
        /// Output format: text, json, csv, dot
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "csv", "dot"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Config file with risk thresholds (default: <root>/importlens.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON file mapping module names to type-checker error counts
        #[arg(long)]
        type_errors: Option<PathBuf>,

        /// Extra exclusion globs on top of the config (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Show every module with its tier justification (text format)
        #[arg(long)]
        details: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Analyze {
            format,
            output,
            config,
            type_errors,
            exclude,
            details,
        }) => analyze::run(
            &cli.path,
            &format,
            output.as_deref(),
            config.as_deref(),
            type_errors.as_deref(),
            exclude,
            details,
            cli.workers,
        ),

        // Bare `importlens <path>` behaves like `analyze` with defaults
        None => analyze::run(
            &cli.path,
            "text",
            None,
            None,
            None,
            Vec::new(),
            false,
            cli.workers,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workers_bounds() {
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("abc").is_err());
        assert_eq!(parse_workers("8").unwrap(), 8);
    }

    #[test]
    fn cli_parses_analyze_flags() {
        use clap::Parser;
        let cli = Cli::parse_from([
            "importlens",
            "analyze",
            "proj",
            "--format",
            "csv",
            "-o",
            "out.csv",
            "--details",
        ]);
        assert_eq!(cli.path, PathBuf::from("proj"));
        match cli.command {
            Some(Commands::Analyze {
                format,
                output,
                details,
                ..
            }) => {
                assert_eq!(format, "csv");
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert!(details);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn bare_path_defaults_to_analyze() {
        use clap::Parser;
        let cli = Cli::parse_from(["importlens", "proj"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.path, PathBuf::from("proj"));
    }
}
