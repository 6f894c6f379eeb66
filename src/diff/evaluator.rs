//! Budget evaluation for a single entry

use super::types::{DiffChange, DiffFromBase, FailReason, FileDetails, FileStatus};

/// Apply the entry's own budgets to its delta
///
/// - `maxSize` fails when `size > maxSize`; an entry exactly at its budget passes.
/// - `maxPercentIncrease` fails only for an increase whose percent is strictly
///   greater than the budget. Decreases never trip it.
///
/// Every violated rule is reported, in the order above.
///
/// # Examples
///
/// ```
/// use sizewatch::diff::evaluator::evaluate;
/// use sizewatch::diff::differ::compute_diff;
/// use sizewatch::diff::{Compression, FailReason, FileDetails};
///
/// let details = FileDetails::new("a.js", 120, Compression::Gzip).with_max_size(100);
/// let status = evaluate(&details, &compute_diff(120, Some(100)));
/// assert_eq!(status.fail_reasons(), &[FailReason::MaxSize]);
/// ```
pub fn evaluate(details: &FileDetails, diff: &DiffFromBase) -> FileStatus {
    let mut reasons = Vec::new();

    if let Some(max_size) = details.max_size {
        if details.size > max_size {
            reasons.push(FailReason::MaxSize);
        }
    }

    if let Some(max_percent) = details.max_percent_increase {
        if diff.change == DiffChange::Increase && diff.percent > max_percent {
            reasons.push(FailReason::MaxPercentIncrease);
        }
    }

    FileStatus::from_reasons(reasons)
}
