//! Source parsing for import extraction
//!
//! Python is the only analyzed language; the dispatch-by-extension entry
//! point keeps room for sibling grammars without touching callers.

pub mod python;

use anyhow::Result;
use std::path::Path;

/// File extensions the scanner considers source files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Parse a file and extract its import statements and module facts
pub fn parse_file(path: &Path) -> Result<ParseResult> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "py" | "pyi" => python::parse(path),
        _ => Ok(ParseResult::default()),
    }
}

/// A single import statement lifted from source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStmt {
    /// Dotted module path as written (empty for bare `from . import x`)
    pub module: String,
    /// Relative-import level: number of leading dots (0 = absolute)
    pub level: u32,
    /// Names pulled in by a `from` import; empty for plain `import`
    pub names: Vec<String>,
    /// 1-based source line of the statement
    pub line: u32,
}

impl ImportStmt {
    /// A plain absolute `import module` statement
    pub fn absolute(module: impl Into<String>, line: u32) -> Self {
        Self {
            module: module.into(),
            level: 0,
            names: Vec::new(),
            line,
        }
    }
}

/// Result of parsing a single source file
#[derive(Debug, Default, Clone)]
pub struct ParseResult {
    /// Import statements in source order
    pub imports: Vec<ImportStmt>,
    /// Line count of the file
    pub loc: usize,
    /// Whether the module opens with a docstring
    pub has_docstring: bool,
}
