//! Diff report engine
//!
//! Compares a set of measured files and groups against an optional baseline
//! snapshot and decides pass/fail per entry and overall:
//! - [`matcher`]: align current entries with baseline entries by path
//! - [`differ`]: byte/percent deltas
//! - [`evaluator`]: `maxSize` / `maxPercentIncrease` budgets
//! - [`report`]: run the above over files and groups, compute totals
//!
//! The engine is pure and synchronous. It never fails on well-formed input.

pub mod differ;
pub mod evaluator;
pub mod matcher;
pub mod report;
pub mod types;

pub use differ::{compute_diff, percent_change, ZERO_BASELINE_PERCENT};
pub use evaluator::evaluate;
pub use matcher::{match_entries, MatchKind, MatchResult};
pub use report::generate_diff_report;
pub use types::{
    Compression, DiffChange, DiffFromBase, DiffReport, DiffReportInput, DiffStats, FailReason,
    FileDetails, FileDetailsDiff, FileStatus, StatsDiff, Status,
};
