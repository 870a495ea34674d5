//! Project scanning and import resolution
//!
//! Walks a project root (gitignore semantics plus configured exclusions),
//! maps each source file to a dotted module name, parses files in parallel,
//! and resolves import statements to local modules. Imports that point
//! outside the project are not errors; they are dropped. Files that fail to
//! parse are recorded and skipped, never aborting the scan.

use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, Result};
use crate::models::{Module, SkippedFile};
use crate::parsers::{self, ImportStmt, SUPPORTED_EXTENSIONS};
use ignore::WalkBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Custom ignore file honored in addition to .gitignore
const CUSTOM_IGNORE_FILE: &str = ".importlensignore";

/// Result of scanning a project root
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Modules keyed by insertion, sorted by name
    pub modules: Vec<Module>,
    /// Files excluded from the graph, with reasons
    pub skipped: Vec<SkippedFile>,
    /// Total source files discovered (parsed + skipped)
    pub files: usize,
}

/// Scan a project root into a set of resolved modules.
///
/// The only fatal failure is an unreadable root; everything else degrades
/// to a `SkippedFile` entry.
pub fn scan(root: &Path, config: &AnalysisConfig) -> Result<ScanOutcome> {
    // Surface the one fatal error up front
    std::fs::read_dir(root).map_err(|source| AnalysisError::UnreadableProjectRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = collect_source_files(root, config);
    files.sort();
    debug!("discovered {} source files under {}", files.len(), root.display());

    // Parse phase: each file is independent, so parallelism is safe; the
    // collect below is the barrier before any graph work.
    let parsed: Vec<(PathBuf, anyhow::Result<parsers::ParseResult>)> = files
        .par_iter()
        .map(|rel| (rel.clone(), parsers::parse_file(&root.join(rel))))
        .collect();

    let mut outcome = ScanOutcome {
        files: files.len(),
        ..Default::default()
    };

    // Name every parseable file, skipping duplicates deterministically
    let mut raw: Vec<RawModule> = Vec::new();
    let mut seen_names: FxHashSet<String> = FxHashSet::default();
    for (rel, result) in parsed {
        let parse = match result {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping {}: {:#}", rel.display(), e);
                outcome.skipped.push(SkippedFile {
                    path: rel,
                    reason: format!("{:#}", e),
                });
                continue;
            }
        };
        let Some((name, is_package)) = module_name_for(&rel) else {
            outcome.skipped.push(SkippedFile {
                path: rel,
                reason: "cannot derive a module name".to_string(),
            });
            continue;
        };
        if !seen_names.insert(name.clone()) {
            outcome.skipped.push(SkippedFile {
                path: rel,
                reason: format!("duplicate module name '{name}'"),
            });
            continue;
        }
        raw.push(RawModule {
            name,
            path: rel,
            is_package,
            parse,
        });
    }

    // Resolution needs the complete name set, so it runs after the scan
    let known: FxHashSet<&str> = raw.iter().map(|m| m.name.as_str()).collect();
    for m in &raw {
        let mut resolved: Vec<String> = m
            .parse
            .imports
            .iter()
            .flat_map(|stmt| resolve_stmt(stmt, &m.name, m.is_package, &known))
            .filter(|target| target != &m.name)
            .collect();
        resolved.sort();
        resolved.dedup();

        outcome.modules.push(Module {
            name: m.name.clone(),
            path: m.path.clone(),
            loc: m.parse.loc,
            has_docstring: m.parse.has_docstring,
            imports: resolved,
        });
    }
    outcome.modules.sort_by(|a, b| a.name.cmp(&b.name));
    outcome.skipped.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(outcome)
}

struct RawModule {
    name: String,
    path: PathBuf,
    is_package: bool,
    parse: parsers::ParseResult,
}

/// Collect source files under the root, honoring .gitignore and the
/// configured exclusion patterns. Paths come back root-relative.
fn collect_source_files(root: &Path, config: &AnalysisConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(CUSTOM_IGNORE_FILE);

    for entry in builder.build().flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !SUPPORTED_EXTENSIONS.contains(&ext) {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        if config.exclude.should_exclude(rel) {
            continue;
        }
        files.push(rel.to_path_buf());
    }

    files
}

/// Map a root-relative file path to its dotted module name.
///
/// `pkg/mod.py` becomes `pkg.mod`; `pkg/__init__.py` becomes `pkg` and is
/// flagged as a package. A bare `__init__.py` at the root has no name.
pub fn module_name_for(rel: &Path) -> Option<(String, bool)> {
    let stem = rel.file_stem()?.to_str()?;
    let mut parts: Vec<&str> = rel
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    let is_package = stem == "__init__";
    if !is_package {
        parts.push(stem);
    }
    if parts.is_empty() {
        return None;
    }
    Some((parts.join("."), is_package))
}

/// Resolve one import statement to local module names.
///
/// Relative levels are applied against the importer's package; candidates
/// are matched against the known set by longest dotted prefix. Anything
/// that fails to match is outside the project and silently discarded.
fn resolve_stmt(
    stmt: &ImportStmt,
    importer: &str,
    importer_is_package: bool,
    known: &FxHashSet<&str>,
) -> Vec<String> {
    let Some(base) = absolute_base(stmt, importer, importer_is_package) else {
        return Vec::new();
    };

    let mut candidates: Vec<String> = Vec::new();
    if stmt.names.is_empty() {
        candidates.push(base);
    } else {
        // `from base import name` may bind the submodule base.name
        for name in &stmt.names {
            if base.is_empty() {
                candidates.push(name.clone());
            } else {
                candidates.push(format!("{base}.{name}"));
            }
        }
        if !base.is_empty() {
            candidates.push(base);
        }
    }

    candidates
        .iter()
        .filter_map(|c| longest_local_prefix(c, known))
        .collect()
}

/// Compute the absolute dotted path an import statement refers to.
/// Returns None when a relative import escapes the project root.
fn absolute_base(stmt: &ImportStmt, importer: &str, importer_is_package: bool) -> Option<String> {
    if stmt.level == 0 {
        return Some(stmt.module.clone());
    }

    let mut pkg: Vec<&str> = importer.split('.').collect();
    if !importer_is_package {
        pkg.pop();
    }
    // One dot means the current package; each further dot climbs one level
    let climb = (stmt.level - 1) as usize;
    if climb > pkg.len() {
        return None;
    }
    pkg.truncate(pkg.len() - climb);

    if !stmt.module.is_empty() {
        pkg.extend(stmt.module.split('.'));
    }
    Some(pkg.join("."))
}

/// Longest dotted prefix of `candidate` that names a local module
fn longest_local_prefix(candidate: &str, known: &FxHashSet<&str>) -> Option<String> {
    if candidate.is_empty() {
        return None;
    }
    let mut current = candidate;
    loop {
        if known.contains(current) {
            return Some(current.to_string());
        }
        match current.rfind('.') {
            Some(idx) => current = &current[..idx],
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use std::fs;

    fn known(names: &[&'static str]) -> FxHashSet<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn module_names_from_paths() {
        assert_eq!(
            module_name_for(Path::new("pkg/sub/mod.py")),
            Some(("pkg.sub.mod".to_string(), false))
        );
        assert_eq!(
            module_name_for(Path::new("pkg/__init__.py")),
            Some(("pkg".to_string(), true))
        );
        assert_eq!(
            module_name_for(Path::new("top.py")),
            Some(("top".to_string(), false))
        );
        assert_eq!(module_name_for(Path::new("__init__.py")), None);
    }

    #[test]
    fn absolute_import_resolves_by_prefix() {
        let known = known(&["pkg", "pkg.sub"]);
        let stmt = ImportStmt::absolute("pkg.sub.missing", 1);
        let resolved = resolve_stmt(&stmt, "other", false, &known);
        assert_eq!(resolved, vec!["pkg.sub"]);
    }

    #[test]
    fn external_import_is_dropped() {
        let known = known(&["pkg"]);
        let stmt = ImportStmt::absolute("os.path", 1);
        assert!(resolve_stmt(&stmt, "pkg", false, &known).is_empty());
    }

    #[test]
    fn from_import_binds_submodule() {
        // from pkg import tools, where pkg/tools.py exists
        let known = known(&["pkg", "pkg.tools"]);
        let stmt = ImportStmt {
            module: "pkg".to_string(),
            level: 0,
            names: vec!["tools".to_string()],
            line: 1,
        };
        let resolved = resolve_stmt(&stmt, "app", false, &known);
        assert!(resolved.contains(&"pkg.tools".to_string()));
    }

    #[test]
    fn relative_import_uses_importer_package() {
        let known = known(&["pkg.a", "pkg.b"]);
        // Inside pkg/a.py: from . import b
        let stmt = ImportStmt {
            module: String::new(),
            level: 1,
            names: vec!["b".to_string()],
            line: 1,
        };
        assert_eq!(resolve_stmt(&stmt, "pkg.a", false, &known), vec!["pkg.b"]);
    }

    #[test]
    fn relative_import_from_package_init() {
        let known = known(&["pkg", "pkg.core"]);
        // Inside pkg/__init__.py: from .core import engine
        let stmt = ImportStmt {
            module: "core".to_string(),
            level: 1,
            names: vec!["engine".to_string()],
            line: 1,
        };
        let resolved = resolve_stmt(&stmt, "pkg", true, &known);
        assert!(resolved.contains(&"pkg.core".to_string()));
    }

    #[test]
    fn relative_import_escaping_root_is_dropped() {
        let known = known(&["top"]);
        // Inside top.py (no package): from ... import anything
        let stmt = ImportStmt {
            module: String::new(),
            level: 3,
            names: vec!["anything".to_string()],
            line: 1,
        };
        assert!(resolve_stmt(&stmt, "top", false, &known).is_empty());
    }

    #[test]
    fn scan_builds_modules_and_drops_self_imports() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "import b\nimport a\n").unwrap();
        fs::write(dir.path().join("b.py"), "\"\"\"b docs\"\"\"\n").unwrap();

        let outcome = scan(dir.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.files, 2);
        assert_eq!(outcome.modules.len(), 2);
        assert!(outcome.skipped.is_empty());

        let a = &outcome.modules[0];
        assert_eq!(a.name, "a");
        // Self-import dropped
        assert_eq!(a.imports, vec!["b"]);
        assert!(!a.has_docstring);
        assert!(outcome.modules[1].has_docstring);
    }

    #[test]
    fn scan_records_broken_files_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.py"), "import other\n").unwrap();
        fs::write(dir.path().join("other.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("broken.py"), "def oops(:\n").unwrap();

        let outcome = scan(dir.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.files, 3);
        assert_eq!(outcome.modules.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].path, Path::new("broken.py"));
    }

    #[test]
    fn scan_unreadable_root_is_fatal() {
        let result = scan(
            Path::new("/nonexistent/importlens-test-root"),
            &AnalysisConfig::default(),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::UnreadableProjectRoot { .. })
        ));
    }

    #[test]
    fn scan_honors_exclusions() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("__pycache__")).unwrap();
        fs::write(dir.path().join("__pycache__/cached.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("real.py"), "x = 1\n").unwrap();

        let outcome = scan(dir.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.modules.len(), 1);
        assert_eq!(outcome.modules[0].name, "real");
    }
}
