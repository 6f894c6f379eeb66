//! Data model shared by the diff engine and its collaborators
//!
//! Field names serialize in camelCase so reports and commit records keep the
//! same JSON shape the rest of the tooling (dashboards, stored records)
//! already consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compression applied before an entry was measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw file size
    None,
    /// gzip at the default level
    #[default]
    Gzip,
    /// brotli at maximum quality
    Brotli,
}

impl Compression {
    /// All supported compressions, in config order
    pub const ALL: [Compression; 3] = [Compression::None, Compression::Gzip, Compression::Brotli];

    /// Lowercase name used in config files and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Brotli => "brotli",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measured artifact: a single file or a named group of files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetails {
    /// Glob or identifier that selected this entry
    pub pattern: String,
    /// Resolved location; the identity used for baseline matching
    pub path: String,
    /// Size in bytes after `compression`
    pub size: u64,
    /// Compression used for `size`
    pub compression: Compression,
    /// Absolute budget in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    /// Allowed growth over the baseline, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_percent_increase: Option<f64>,
}

impl FileDetails {
    /// Entry without budgets, using `path` as its pattern
    pub fn new(path: impl Into<String>, size: u64, compression: Compression) -> Self {
        let path = path.into();
        Self {
            pattern: path.clone(),
            path,
            size,
            compression,
            max_size: None,
            max_percent_increase: None,
        }
    }

    /// Set the absolute size budget
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Set the percent-increase budget
    pub fn with_max_percent_increase(mut self, percent: f64) -> Self {
        self.max_percent_increase = Some(percent);
        self
    }

    /// True if any budget is configured
    pub fn has_budget(&self) -> bool {
        self.max_size.is_some() || self.max_percent_increase.is_some()
    }
}

/// Direction of a size change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffChange {
    /// Same size as the baseline
    NoChange,
    /// Grew
    Increase,
    /// Shrank
    Decrease,
}

/// Delta between a current entry and its baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffFromBase {
    /// current - baseline (baseline is 0 when absent)
    pub bytes: i64,
    /// Percent delta relative to the baseline, unrounded
    pub percent: f64,
    /// Sign of `bytes`
    pub change: DiffChange,
}

/// Budget rule an entry violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailReason {
    /// `size > maxSize`
    MaxSize,
    /// Grew by more than `maxPercentIncrease`
    MaxPercentIncrease,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::MaxSize => f.write_str("max size exceeded"),
            FailReason::MaxPercentIncrease => f.write_str("max percent increase exceeded"),
        }
    }
}

/// Overall pass/fail verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every budget held
    Pass,
    /// At least one budget was violated
    Fail,
}

/// Per-entry verdict
///
/// `Fail` always carries the violated rules; use [`FileStatus::from_reasons`]
/// so an empty reason list can never produce a failing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    /// No budget violated
    Pass,
    /// One or more budgets violated
    Fail {
        /// Violated rules, in evaluation order
        #[serde(rename = "failReasons")]
        fail_reasons: Vec<FailReason>,
    },
}

impl FileStatus {
    /// `Pass` for no reasons, `Fail` otherwise
    pub fn from_reasons(fail_reasons: Vec<FailReason>) -> Self {
        if fail_reasons.is_empty() {
            FileStatus::Pass
        } else {
            FileStatus::Fail { fail_reasons }
        }
    }

    /// Collapse to the two-valued status
    pub fn status(&self) -> Status {
        match self {
            FileStatus::Pass => Status::Pass,
            FileStatus::Fail { .. } => Status::Fail,
        }
    }

    /// Violated rules (empty for `Pass`)
    pub fn fail_reasons(&self) -> &[FailReason] {
        match self {
            FileStatus::Pass => &[],
            FileStatus::Fail { fail_reasons } => fail_reasons,
        }
    }

    /// True for `Fail`
    pub fn is_fail(&self) -> bool {
        matches!(self, FileStatus::Fail { .. })
    }
}

/// Fully evaluated entry: details, delta and verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetailsDiff {
    /// Measured entry
    #[serde(flatten)]
    pub details: FileDetails,
    /// Delta from the baseline
    pub diff: DiffFromBase,
    /// Budget verdict
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Current measurements (or a baseline snapshot)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReportInput {
    /// Individual files
    #[serde(default)]
    pub files: Vec<FileDetails>,
    /// Caller-defined groups
    #[serde(default)]
    pub groups: Vec<FileDetails>,
}

impl DiffReportInput {
    /// Build from file and group lists
    pub fn new(files: Vec<FileDetails>, groups: Vec<FileDetails>) -> Self {
        Self { files, groups }
    }

    /// True if there is nothing to compare
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.groups.is_empty()
    }
}

/// Byte and percent delta of the summed sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsDiff {
    /// currBranchSize - baseBranchSize
    pub bytes: i64,
    /// Percent delta with the same convention as per-entry diffs
    pub percent: f64,
}

/// Aggregate over `files` (groups are excluded to avoid double counting)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    /// Sum of current file sizes
    pub curr_branch_size: u64,
    /// Sum of matched baseline file sizes
    pub base_branch_size: u64,
    /// Delta of the two sums
    pub diff: StatsDiff,
}

/// Comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Evaluated files, in input order
    pub files: Vec<FileDetailsDiff>,
    /// Evaluated groups, in input order
    pub groups: Vec<FileDetailsDiff>,
    /// Totals across files
    pub stats: DiffStats,
    /// Fail iff any file or group failed
    pub status: Status,
}

impl DiffReport {
    /// Files and groups that failed a budget
    pub fn failures(&self) -> impl Iterator<Item = &FileDetailsDiff> {
        self.files
            .iter()
            .chain(self.groups.iter())
            .filter(|entry| entry.status.is_fail())
    }

    /// True if the overall status is `Pass`
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}
