//! Python parser using tree-sitter
//!
//! Extracts import statements (absolute, aliased, and relative with their
//! dot level), the module line count, and docstring presence.

use crate::parsers::{ImportStmt, ParseResult};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parse a Python file
pub fn parse(path: &Path) -> Result<ParseResult> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_source(&source).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse Python source code directly (useful for testing)
pub fn parse_source(source: &str) -> Result<ParseResult> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Python language")?;

    let tree = parser
        .parse(source, None)
        .context("Failed to parse Python source")?;

    let root = tree.root_node();
    if root.has_error() {
        bail!("syntax error");
    }

    let source_bytes = source.as_bytes();
    let mut result = ParseResult {
        loc: source.lines().count(),
        has_docstring: has_module_docstring(&root),
        ..Default::default()
    };

    extract_imports(&root, source_bytes, &mut result);

    Ok(result)
}

/// A module docstring is a leading expression statement holding a string
fn has_module_docstring(root: &Node) -> bool {
    let Some(first) = root.named_child(0) else {
        return false;
    };
    if first.kind() != "expression_statement" {
        return false;
    }
    first
        .named_child(0)
        .map(|n| n.kind() == "string")
        .unwrap_or(false)
}

/// Walk the whole tree and collect import statements at any depth.
///
/// Imports guarded by `try:/except ImportError:`, `if TYPE_CHECKING:`, or
/// living inside a function body still create edges; a static dependency
/// exists wherever the statement is written.
fn extract_imports(node: &Node, source: &[u8], result: &mut ParseResult) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        let line = child.start_position().row as u32 + 1;
        match child.kind() {
            "import_statement" => {
                // import module1, module2 as alias
                for part in child.children(&mut child.walk()) {
                    if part.kind() == "dotted_name" {
                        if let Ok(text) = part.utf8_text(source) {
                            result.imports.push(ImportStmt::absolute(text, line));
                        }
                    } else if part.kind() == "aliased_import" {
                        if let Some(name_node) = part.child_by_field_name("name") {
                            if let Ok(text) = name_node.utf8_text(source) {
                                result.imports.push(ImportStmt::absolute(text, line));
                            }
                        }
                    }
                }
            }
            "import_from_statement" => {
                if let Some(stmt) = parse_from_import(&child, source, line) {
                    result.imports.push(stmt);
                }
            }
            _ => extract_imports(&child, source, result),
        }
    }
}

/// Handle `from module import name1, name2` including relative forms
fn parse_from_import(node: &Node, source: &[u8], line: u32) -> Option<ImportStmt> {
    let module_node = node.child_by_field_name("module_name")?;

    let (module, level) = match module_node.kind() {
        "dotted_name" => (module_node.utf8_text(source).ok()?.to_string(), 0),
        "relative_import" => {
            // Leading dots carry the level; the rest (if any) is the module
            let text = module_node.utf8_text(source).ok()?;
            let level = text.chars().take_while(|&c| c == '.').count() as u32;
            let module = text.trim_start_matches('.').to_string();
            (module, level)
        }
        _ => return None,
    };

    // Imported names: every dotted_name/aliased_import after the module node
    let mut names = Vec::new();
    for child in node.children(&mut node.walk()) {
        if child.id() == module_node.id() {
            continue;
        }
        match child.kind() {
            "dotted_name" => {
                if let Ok(text) = child.utf8_text(source) {
                    names.push(text.to_string());
                }
            }
            "aliased_import" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    if let Ok(text) = name_node.utf8_text(source) {
                        names.push(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    Some(ImportStmt {
        module,
        level,
        names,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_imports() {
        let source = "import os\nimport pkg.sub\n";
        let result = parse_source(source).expect("should parse imports");

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].module, "os");
        assert_eq!(result.imports[0].level, 0);
        assert_eq!(result.imports[1].module, "pkg.sub");
        assert_eq!(result.imports[1].line, 2);
    }

    #[test]
    fn test_aliased_import() {
        let source = "import numpy as np\n";
        let result = parse_source(source).expect("should parse aliased import");

        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "numpy");
    }

    #[test]
    fn test_from_import() {
        let source = "from pkg.mod import first, second as s\n";
        let result = parse_source(source).expect("should parse from import");

        assert_eq!(result.imports.len(), 1);
        let stmt = &result.imports[0];
        assert_eq!(stmt.module, "pkg.mod");
        assert_eq!(stmt.level, 0);
        assert_eq!(stmt.names, vec!["first", "second"]);
    }

    #[test]
    fn test_relative_imports() {
        let source = "from . import sibling\nfrom ..core import engine\n";
        let result = parse_source(source).expect("should parse relative imports");

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].module, "");
        assert_eq!(result.imports[0].level, 1);
        assert_eq!(result.imports[0].names, vec!["sibling"]);
        assert_eq!(result.imports[1].module, "core");
        assert_eq!(result.imports[1].level, 2);
        assert_eq!(result.imports[1].names, vec!["engine"]);
    }

    #[test]
    fn test_wildcard_import_keeps_module() {
        let source = "from pkg.helpers import *\n";
        let result = parse_source(source).expect("should parse wildcard import");

        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "pkg.helpers");
        assert!(result.imports[0].names.is_empty());
    }

    #[test]
    fn test_docstring_detection() {
        let with = "\"\"\"Module docs.\"\"\"\nimport os\n";
        let without = "import os\n";

        assert!(parse_source(with).unwrap().has_docstring);
        assert!(!parse_source(without).unwrap().has_docstring);
    }

    #[test]
    fn test_comment_is_not_a_docstring() {
        let source = "# just a comment\nimport os\n";
        assert!(!parse_source(source).unwrap().has_docstring);
    }

    #[test]
    fn test_loc_counted() {
        let source = "import os\n\n\nx = 1\n";
        let result = parse_source(source).unwrap();
        assert_eq!(result.loc, 4);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let source = "def broken(:\n    pass\n";
        assert!(parse_source(source).is_err());
    }

    #[test]
    fn test_function_level_imports_are_extracted() {
        let source = "def f():\n    import lazy.helper\n";
        let result = parse_source(source).expect("should parse function");

        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "lazy.helper");
        assert_eq!(result.imports[0].line, 2);
    }

    #[test]
    fn test_try_guarded_import_is_extracted() {
        let source = "try:\n    import fallback\nexcept ImportError:\n    fallback = None\n";
        let result = parse_source(source).expect("should parse guarded import");

        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "fallback");
    }

    #[test]
    fn test_type_checking_block_imports_are_extracted() {
        let source = "from typing import TYPE_CHECKING\nif TYPE_CHECKING:\n    from pkg import heavy\n";
        let result = parse_source(source).expect("should parse conditional import");

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[1].module, "pkg");
        assert_eq!(result.imports[1].names, vec!["heavy"]);
    }
}
