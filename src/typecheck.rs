//! External type-checker input
//!
//! The analyzer never runs a type checker itself; a caller may hand in a
//! JSON object mapping module names to error counts (for example distilled
//! from a mypy run). Absent input behaves as zero errors everywhere.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Per-module error counts from an external type-checker run
#[derive(Debug, Clone, Default)]
pub struct TypeErrorCounts {
    counts: FxHashMap<String, usize>,
}

impl TypeErrorCounts {
    /// Load counts from a JSON file shaped as `{"pkg.mod": 3, ...}`
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read type-error file: {}", path.display()))?;
        let counts: FxHashMap<String, usize> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid type-error JSON in {}", path.display()))?;
        Ok(Self { counts })
    }

    /// Errors attributed to one module (zero when unknown)
    pub fn for_module(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Total errors across all modules
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_input_is_all_zero() {
        let counts = TypeErrorCounts::default();
        assert_eq!(counts.for_module("anything"), 0);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn loads_module_counts_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mypy.json");
        std::fs::write(&path, r#"{"pkg.core": 4, "pkg.util": 1}"#).unwrap();

        let counts = TypeErrorCounts::load(&path).unwrap();
        assert_eq!(counts.for_module("pkg.core"), 4);
        assert_eq!(counts.for_module("pkg.other"), 0);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mypy.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TypeErrorCounts::load(&path).is_err());
    }
}
