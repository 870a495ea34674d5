//! Analysis configuration
//!
//! Loads per-project configuration from an `importlens.toml` file in the
//! project root (or an explicit `--config` path). Every risk threshold the
//! classifier uses lives here so projects can tune the tier boundaries
//! without recompiling.
//!
//! # Configuration Format
//!
//! ```toml
//! # importlens.toml
//!
//! [thresholds]
//! critical_fan_in = 6      # imported_by >= this => CRITICAL
//! critical_impact = 75.0   # impact score >= this => CRITICAL
//! god_module_fan_out = 15  # imports >= this => HIGH
//! high_impact = 50.0       # impact score >= this => HIGH
//! medium_fan_in = 3        # imported_by >= this => MEDIUM
//! medium_fan_out = 8       # imports > this => MEDIUM
//! medium_impact = 25.0     # impact score > this => MEDIUM
//!
//! [penalties]
//! critical = 20
//! high = 10
//! medium = 5
//! type_error = 2
//!
//! [exclude]
//! paths = ["migrations/", "generated/"]
//! ```

use crate::errors::{AnalysisError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Built-in exclusion patterns for directories that never hold first-party
/// Python source. Applied unless `skip_defaults = true` in config.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/__pycache__/**",
    "**/.venv/**",
    "**/venv/**",
    "**/env/**",
    "**/.tox/**",
    "**/.pytest_cache/**",
    "**/.mypy_cache/**",
    "**/node_modules/**",
    "**/build/**",
    "**/dist/**",
    "**/*.egg-info/**",
];

/// Name of the per-project config file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "importlens.toml";

/// Risk-tier boundary values
///
/// The classifier evaluates these top-down, first match wins:
/// CRITICAL, then HIGH, then MEDIUM, else LOW.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// `imported_by_count >= critical_fan_in` classifies CRITICAL
    pub critical_fan_in: usize,
    /// `impact_score >= critical_impact` classifies CRITICAL
    pub critical_impact: f64,
    /// `imports_count >= god_module_fan_out` classifies HIGH
    pub god_module_fan_out: usize,
    /// `impact_score >= high_impact` classifies HIGH
    pub high_impact: f64,
    /// `imported_by_count >= medium_fan_in` classifies MEDIUM
    pub medium_fan_in: usize,
    /// `imports_count > medium_fan_out` classifies MEDIUM
    pub medium_fan_out: usize,
    /// `impact_score > medium_impact` classifies MEDIUM
    pub medium_impact: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_fan_in: 6,
            critical_impact: 75.0,
            god_module_fan_out: 15,
            high_impact: 50.0,
            medium_fan_in: 3,
            medium_fan_out: 8,
            medium_impact: 25.0,
        }
    }
}

/// Health-score deductions
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Penalties {
    /// Points deducted per CRITICAL module
    pub critical: u32,
    /// Points deducted per HIGH module
    pub high: u32,
    /// Points deducted per MEDIUM module
    pub medium: u32,
    /// Points deducted per external type-checker error
    pub type_error: u32,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            critical: 20,
            high: 10,
            medium: 5,
            type_error: 2,
        }
    }
}

/// Path exclusion settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExcludeConfig {
    /// Glob patterns relative to the project root
    pub paths: Vec<String>,
    /// Skip the built-in DEFAULT_EXCLUDE_PATTERNS
    pub skip_defaults: bool,
}

impl ExcludeConfig {
    /// Effective exclusion patterns: defaults (unless skipped) plus
    /// configured paths.
    pub fn effective_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = if self.skip_defaults {
            Vec::new()
        } else {
            DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect()
        };
        patterns.extend(self.paths.iter().cloned());
        patterns
    }

    /// Check whether a root-relative path matches any exclusion pattern
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.effective_patterns()
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Minimal glob matching for exclusion patterns.
///
/// Supports `**/dir/**` (directory anywhere), a single `**` split, a single
/// `*` split, and bare prefixes. `vendor/` matches only at the root; use
/// `**/vendor/**` for recursive matching.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    if let Some(middle) = pattern
        .strip_prefix("**/")
        .and_then(|p| p.strip_suffix("/**"))
    {
        // The final segment is the file itself, never a directory
        let mut segments: Vec<&str> = path.split('/').collect();
        segments.pop();
        return segments.iter().any(|seg| segment_match(middle, seg));
    }

    if let Some((prefix, suffix)) = pattern.split_once("**") {
        let prefix = prefix.trim_end_matches('/');
        let suffix = suffix.trim_start_matches('/');
        if !prefix.is_empty() && !path.starts_with(prefix) {
            return false;
        }
        if suffix.is_empty() {
            return true;
        }
        return match suffix.split_once('*') {
            None => path.ends_with(suffix),
            Some((before, after)) => {
                (before.is_empty() || path.contains(before)) && path.ends_with(after)
            }
        };
    }

    if let Some((prefix, suffix)) = pattern.split_once('*') {
        return path.starts_with(prefix) && path.ends_with(suffix);
    }

    path == pattern || path.starts_with(pattern)
}

/// Match one path segment against a pattern with at most one `*`
fn segment_match(pattern: &str, segment: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == segment,
        Some((prefix, suffix)) => {
            segment.len() >= prefix.len() + suffix.len()
                && segment.starts_with(prefix)
                && segment.ends_with(suffix)
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub penalties: Penalties,
    pub exclude: ExcludeConfig,
}

impl AnalysisConfig {
    /// Load configuration for a project.
    ///
    /// An explicit `config_path` must exist and parse; otherwise
    /// `<root>/importlens.toml` is used when present, and defaults apply
    /// when it is not. Values are validated before being returned.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!("no {} found, using default config", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| {
            AnalysisError::ConfigRead {
                path: path.clone(),
                source,
            }
        })?;
        let config: AnalysisConfig =
            toml::from_str(&raw).map_err(|source| AnalysisError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        config.validate(&path)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject threshold combinations that would make the tier ladder
    /// ambiguous or the score formula meaningless.
    fn validate(&self, path: &Path) -> Result<()> {
        let t = &self.thresholds;
        let err = |message: String| AnalysisError::Config {
            path: path.to_path_buf(),
            message,
        };

        for (name, v) in [
            ("critical_impact", t.critical_impact),
            ("high_impact", t.high_impact),
            ("medium_impact", t.medium_impact),
        ] {
            if !(0.0..=100.0).contains(&v) {
                return Err(err(format!("{name} must be within 0..=100, got {v}")));
            }
        }
        if t.medium_impact >= t.high_impact {
            return Err(err(format!(
                "medium_impact ({}) must be below high_impact ({})",
                t.medium_impact, t.high_impact
            )));
        }
        if t.high_impact >= t.critical_impact {
            return Err(err(format!(
                "high_impact ({}) must be below critical_impact ({})",
                t.high_impact, t.critical_impact
            )));
        }
        if t.medium_fan_in >= t.critical_fan_in {
            return Err(err(format!(
                "medium_fan_in ({}) must be below critical_fan_in ({})",
                t.medium_fan_in, t.critical_fan_in
            )));
        }
        if t.medium_fan_out >= t.god_module_fan_out {
            return Err(err(format!(
                "medium_fan_out ({}) must be below god_module_fan_out ({})",
                t.medium_fan_out, t.god_module_fan_out
            )));
        }
        if t.critical_fan_in == 0 {
            return Err(err("critical_fan_in must be at least 1".to_string()));
        }
        Ok(())
    }
}
