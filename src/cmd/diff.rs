//! Diff command implementation
//!
//! Handles `sizewatch diff`, which runs the diff engine on measurements
//! stored as JSON (for example the `files`/`groups` of a commit record or
//! output of another tool).

use anyhow::{Context, Result};
use std::path::Path;

use crate::cicd::display::print_report;
use crate::cicd::JsonOutput;
use crate::diff::{generate_diff_report, DiffReport, DiffReportInput};
use crate::error::SizewatchError;

/// Compare `current` against an optional `base` measurement file
///
/// # Examples
///
/// ```no_run
/// use sizewatch::cmd::diff::cmd_diff;
/// use std::path::Path;
///
/// cmd_diff(Path::new("current.json"), Some(Path::new("base.json")), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_diff(current: &Path, base: Option<&Path>, json: bool) -> Result<()> {
    let report = run_diff(current, base)?;

    if json {
        JsonOutput::new(report.clone()).print();
    } else {
        print_report(&report);
    }

    if report.passed() {
        Ok(())
    } else {
        Err(SizewatchError::BudgetExceeded {
            failed: report.failures().count(),
        }
        .into())
    }
}

/// Load both inputs and generate the report
pub fn run_diff(current: &Path, base: Option<&Path>) -> Result<DiffReport> {
    let input = load_input(current).context("Failed to load current measurements")?;
    let baseline = base
        .map(load_input)
        .transpose()
        .context("Failed to load base measurements")?;

    Ok(generate_diff_report(&input, baseline.as_ref()))
}

/// Read and check a `DiffReportInput` JSON file
pub fn load_input(path: &Path) -> Result<DiffReportInput> {
    let contents = std::fs::read_to_string(path).map_err(|source| SizewatchError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;

    let input: DiffReportInput =
        serde_json::from_str(&contents).map_err(|e| SizewatchError::InvalidInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    for entry in input.files.iter().chain(&input.groups) {
        if let Some(percent) = entry.max_percent_increase {
            if !percent.is_finite() || percent < 0.0 {
                return Err(SizewatchError::InvalidInput {
                    path: path.to_path_buf(),
                    reason: format!(
                        "{}: maxPercentIncrease must be a non-negative number, got {}",
                        entry.path, percent
                    ),
                }
                .into());
            }
        }
    }

    Ok(input)
}
