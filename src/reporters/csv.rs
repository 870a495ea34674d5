//! CSV reporter
//!
//! Emits a `#`-prefixed metadata block followed by one row per module, in
//! the report's severity order. Long file paths are abbreviated to keep
//! spreadsheet columns readable.

use crate::models::AnalysisReport;
use anyhow::Result;

/// Paths longer than this are abbreviated
const MAX_PATH_CHARS: usize = 25;
/// Characters kept from each end of an abbreviated path
const PATH_EDGE_CHARS: usize = 11;

const HEADER: &str = "module_name,risk_tier,impact_score,imported_by_count,imports_count,\
                      lines_of_code,type_errors,in_cycle,has_docstring,file_path,justification";

/// Render report as CSV with a metadata header block
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut lines = Vec::new();

    lines.push("# importlens dependency analysis".to_string());
    lines.push(format!("# generated_at,{}", report.generated_at.to_rfc3339()));
    lines.push(format!("# project,{}", report.project_analyzed.display()));
    lines.push(format!("# health_score,{}", report.health_score));
    lines.push(format!(
        "# files,{},modules,{},imports,{}",
        report.totals.files, report.totals.modules, report.totals.imports
    ));
    lines.push(HEADER.to_string());

    for m in &report.modules {
        let row = [
            quote(&m.name),
            quote(&m.risk_tier.to_string()),
            format!("{:.1}", m.impact_score),
            m.imported_by_count.to_string(),
            m.imports_count.to_string(),
            m.loc.to_string(),
            m.type_errors.to_string(),
            m.in_cycle.to_string(),
            m.has_docstring.to_string(),
            quote(&abbreviate_path(&m.file_path.display().to_string())),
            quote(&m.justification),
        ];
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

/// Quote a field, doubling embedded quotes per RFC 4180
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Abbreviate a path over 25 characters to `<first 11>...<last 11>`.
pub(crate) fn abbreviate_path(path: &str) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= MAX_PATH_CHARS {
        return path.to_string();
    }
    let head: String = chars[..PATH_EDGE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - PATH_EDGE_CHARS..].iter().collect();
    format!("{head}...{tail}")
}
