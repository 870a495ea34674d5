//! Init command - write a commented starter config

use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ImportLens configuration
# All values shown are the defaults; uncomment and adjust as needed.

[thresholds]
# A module imported by this many others is CRITICAL regardless of score
# critical_fan_in = 6

# Impact score at or above which a module is CRITICAL
# critical_impact = 75.0

# A module importing this many others is a god module (HIGH)
# god_module_fan_out = 15

# Impact score at or above which a module is HIGH
# high_impact = 50.0

# MEDIUM boundaries (strictly-over for fan-out and impact)
# medium_fan_in = 3
# medium_fan_out = 8
# medium_impact = 25.0

[penalties]
# Health-score deductions per module tier and per type-checker error
# critical = 20
# high = 10
# medium = 5
# type_error = 2

[exclude]
# Glob patterns relative to the project root, on top of the built-in
# defaults (__pycache__, virtualenvs, build output, ...)
# paths = ["generated/**", "**/migrations/**"]

# Set to true to drop the built-in default exclusions entirely
# skip_defaults = false
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} {} already exists, leaving it untouched",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} Run analysis", style("importlens analyze .").cyan());
    println!(
        "  {} Export the graph",
        style("importlens analyze . -f dot -o deps.dot").cyan()
    );

    Ok(())
}
