//! Report assertion helpers

#![allow(dead_code)]

use sizewatch::diff::{DiffChange, DiffReport, FailReason, FileDetailsDiff};

/// Assert that two floating-point values are approximately equal
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Find a file entry by path, panicking with the available paths otherwise
pub fn file<'a>(report: &'a DiffReport, path: &str) -> &'a FileDetailsDiff {
    report
        .files
        .iter()
        .find(|f| f.details.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = report.files.iter().map(|f| f.details.path.as_str()).collect();
            panic!("no file {path:?} in report, have {paths:?}")
        })
}

/// Assert the delta of an entry
pub fn assert_diff(entry: &FileDetailsDiff, bytes: i64, percent: f64, change: DiffChange) {
    assert_eq!(entry.diff.bytes, bytes, "bytes of {}", entry.details.path);
    assert_approx_eq(entry.diff.percent, percent, 1e-9);
    assert_eq!(entry.diff.change, change, "change of {}", entry.details.path);
}

/// Assert the exact fail reasons of an entry (empty means pass)
pub fn assert_reasons(entry: &FileDetailsDiff, reasons: &[FailReason]) {
    assert_eq!(
        entry.status.fail_reasons(),
        reasons,
        "fail reasons of {}",
        entry.details.path
    );
}
