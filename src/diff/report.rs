//! Report aggregation: match, diff and evaluate files and groups

use super::differ::{byte_delta, compute_diff, percent_change};
use super::evaluator::evaluate;
use super::matcher::match_entries;
use super::types::{
    DiffReport, DiffReportInput, DiffStats, FileDetails, FileDetailsDiff, StatsDiff, Status,
};

/// Evaluate one list (files or groups) against its baseline list
fn diff_entries(current: &[FileDetails], baseline: Option<&[FileDetails]>) -> Vec<FileDetailsDiff> {
    let matched = match_entries(current, baseline);

    log::debug!(
        "Matched {} entries ({} added, {} baseline-only dropped)",
        matched.matched_count(),
        matched.added_count(),
        matched.removed.len()
    );
    for removed in &matched.removed {
        log::debug!("Baseline entry {} has no current counterpart", removed.path);
    }

    matched
        .entries
        .iter()
        .map(|entry| {
            let diff = compute_diff(entry.current.size, entry.kind.baseline().map(|b| b.size));
            let status = evaluate(entry.current, &diff);

            FileDetailsDiff {
                details: entry.current.clone(),
                diff,
                status,
            }
        })
        .collect()
}

/// Sum current file sizes and their matched baseline sizes (saturating)
fn compute_stats(current: &[FileDetails], baseline: Option<&[FileDetails]>) -> DiffStats {
    let matched = match_entries(current, baseline);

    let curr_branch_size = matched
        .entries
        .iter()
        .map(|e| e.current.size)
        .fold(0u64, u64::saturating_add);
    let base_branch_size = matched
        .entries
        .iter()
        .filter_map(|e| e.kind.baseline())
        .map(|b| b.size)
        .fold(0u64, u64::saturating_add);

    DiffStats {
        curr_branch_size,
        base_branch_size,
        diff: StatsDiff {
            bytes: byte_delta(curr_branch_size, base_branch_size),
            percent: percent_change(curr_branch_size, base_branch_size),
        },
    }
}

/// Compare current measurements against an optional baseline
///
/// Files and groups are processed independently. Stats cover files only.
/// The overall status is `Fail` iff any file or group fails. Baseline entries
/// without a current counterpart are dropped from the report.
///
/// # Examples
///
/// ```
/// use sizewatch::diff::{generate_diff_report, Compression, DiffReportInput, FileDetails, Status};
///
/// let current = DiffReportInput::new(
///     vec![FileDetails::new("a.js", 120, Compression::Gzip).with_max_size(100)],
///     vec![],
/// );
/// let baseline = DiffReportInput::new(vec![FileDetails::new("a.js", 100, Compression::Gzip)], vec![]);
///
/// let report = generate_diff_report(&current, Some(&baseline));
/// assert_eq!(report.files[0].diff.bytes, 20);
/// assert_eq!(report.status, Status::Fail);
/// ```
pub fn generate_diff_report(
    input: &DiffReportInput,
    baseline: Option<&DiffReportInput>,
) -> DiffReport {
    let base_files = baseline.map(|b| b.files.as_slice());
    let base_groups = baseline.map(|b| b.groups.as_slice());

    let files = diff_entries(&input.files, base_files);
    let groups = diff_entries(&input.groups, base_groups);
    let stats = compute_stats(&input.files, base_files);

    let status = if files.iter().chain(groups.iter()).any(|e| e.status.is_fail()) {
        Status::Fail
    } else {
        Status::Pass
    };

    log::debug!(
        "Diff report: {} files, {} groups, status {:?}",
        files.len(),
        groups.len(),
        status
    );

    DiffReport {
        files,
        groups,
        stats,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::differ::ZERO_BASELINE_PERCENT;
    use crate::diff::types::{Compression, DiffChange, FailReason, FileStatus};

    fn file(path: &str, size: u64) -> FileDetails {
        FileDetails::new(path, size, Compression::Gzip)
    }

    #[test]
    fn test_report_for_empty_input_is_pass() {
        let report = generate_diff_report(&DiffReportInput::default(), None);
        assert!(report.files.is_empty());
        assert!(report.groups.is_empty());
        assert_eq!(report.status, Status::Pass);
        assert_eq!(report.stats.curr_branch_size, 0);
        assert_eq!(report.stats.diff.percent, 0.0);
    }

    #[test]
    fn test_report_max_size_failure_scenario() {
        let input = DiffReportInput::new(vec![file("a.js", 120).with_max_size(100)], vec![]);
        let base = DiffReportInput::new(vec![file("a.js", 100)], vec![]);

        let report = generate_diff_report(&input, Some(&base));
        let entry = &report.files[0];

        assert_eq!(entry.diff.bytes, 20);
        assert_eq!(entry.diff.percent, 20.0);
        assert_eq!(entry.diff.change, DiffChange::Increase);
        assert_eq!(entry.status.fail_reasons(), &[FailReason::MaxSize]);
        assert_eq!(report.status, Status::Fail);
    }

    #[test]
    fn test_report_without_baseline_uses_sentinel() {
        let input = DiffReportInput::new(vec![file("b.js", 50)], vec![]);
        let report = generate_diff_report(&input, None);
        let entry = &report.files[0];

        assert_eq!(entry.diff.bytes, 50);
        assert_eq!(entry.diff.percent, ZERO_BASELINE_PERCENT);
        assert_eq!(entry.diff.change, DiffChange::Increase);
        assert_eq!(entry.status, FileStatus::Pass);
        assert_eq!(report.status, Status::Pass);
    }

    #[test]
    fn test_report_stats_ignore_baseline_only_files() {
        let input = DiffReportInput::new(vec![file("a.js", 100)], vec![]);
        let base = DiffReportInput::new(vec![file("a.js", 80), file("c.js", 30)], vec![]);

        let report = generate_diff_report(&input, Some(&base));

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.stats.curr_branch_size, 100);
        assert_eq!(report.stats.base_branch_size, 80);
        assert_eq!(report.stats.diff.bytes, 20);
        assert_eq!(report.stats.diff.percent, 25.0);
    }

    #[test]
    fn test_report_stats_exclude_groups() {
        let input = DiffReportInput::new(vec![file("a.js", 10)], vec![file("*.js", 10_000)]);
        let report = generate_diff_report(&input, None);

        assert_eq!(report.stats.curr_branch_size, 10);
        assert_eq!(report.stats.base_branch_size, 0);
        assert_eq!(report.stats.diff.percent, ZERO_BASELINE_PERCENT);
    }

    #[test]
    fn test_report_group_failure_fails_overall_status() {
        let input = DiffReportInput::new(
            vec![file("a.js", 10)],
            vec![file("*.js", 500).with_max_size(400)],
        );
        let report = generate_diff_report(&input, None);

        assert_eq!(report.files[0].status, FileStatus::Pass);
        assert!(report.groups[0].status.is_fail());
        assert_eq!(report.status, Status::Fail);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_report_groups_match_only_baseline_groups() {
        // A baseline file with the same path must not be used for a group
        let input = DiffReportInput::new(vec![], vec![file("main", 300)]);
        let base = DiffReportInput::new(vec![file("main", 100)], vec![]);

        let report = generate_diff_report(&input, Some(&base));
        assert_eq!(report.groups[0].diff.bytes, 300);
    }

    #[test]
    fn test_report_stats_saturate_on_huge_sizes() {
        let huge = u64::MAX / 2 + 1;
        let input = DiffReportInput::new(vec![file("a.js", huge), file("b.js", huge)], vec![]);
        let report = generate_diff_report(&input, None);

        assert_eq!(report.stats.curr_branch_size, u64::MAX);
        assert_eq!(report.stats.diff.bytes, i64::MAX);
        assert_eq!(report.files[0].diff.change, DiffChange::Increase);
    }

    #[test]
    fn test_report_is_deterministic() {
        let input = DiffReportInput::new(
            vec![file("a.js", 120).with_max_percent_increase(5.0), file("b.js", 7)],
            vec![file("all", 127)],
        );
        let base = DiffReportInput::new(vec![file("a.js", 100)], vec![file("all", 100)]);

        let first = serde_json::to_string(&generate_diff_report(&input, Some(&base))).unwrap();
        let second = serde_json::to_string(&generate_diff_report(&input, Some(&base))).unwrap();
        assert_eq!(first, second);
    }
}
