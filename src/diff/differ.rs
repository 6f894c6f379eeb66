//! Byte and percent deltas against the baseline

use super::types::{DiffChange, DiffFromBase};

/// Percent reported when an entry grows from a zero-size (or missing) baseline
///
/// Budget checks use this value too, so a `maxPercentIncrease` below 100
/// fails any newly added non-empty entry.
pub const ZERO_BASELINE_PERCENT: f64 = 100.0;

/// Percent change from `baseline` to `current`
///
/// - `baseline > 0`: `(current - baseline) / baseline * 100`
/// - `baseline == 0 && current == 0`: `0`
/// - `baseline == 0 && current > 0`: [`ZERO_BASELINE_PERCENT`]
///
/// # Examples
///
/// ```
/// use sizewatch::diff::differ::{percent_change, ZERO_BASELINE_PERCENT};
///
/// assert_eq!(percent_change(120, 100), 20.0);
/// assert_eq!(percent_change(50, 100), -50.0);
/// assert_eq!(percent_change(0, 0), 0.0);
/// assert_eq!(percent_change(50, 0), ZERO_BASELINE_PERCENT);
/// ```
pub fn percent_change(current: u64, baseline: u64) -> f64 {
    if baseline == 0 {
        return if current == 0 {
            0.0
        } else {
            ZERO_BASELINE_PERCENT
        };
    }

    let bytes = byte_delta(current, baseline);
    (bytes as f64 / baseline as f64) * 100.0
}

/// `current - baseline` as a signed value, saturating at the `i64` bounds
pub fn byte_delta(current: u64, baseline: u64) -> i64 {
    let delta = i128::from(current) - i128::from(baseline);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

/// Direction of a byte delta
pub fn change_of(bytes: i64) -> DiffChange {
    match bytes {
        b if b > 0 => DiffChange::Increase,
        b if b < 0 => DiffChange::Decrease,
        _ => DiffChange::NoChange,
    }
}

/// Delta of one entry; a missing baseline counts as size 0
pub fn compute_diff(current_size: u64, baseline_size: Option<u64>) -> DiffFromBase {
    let baseline_size = baseline_size.unwrap_or(0);
    let bytes = byte_delta(current_size, baseline_size);

    DiffFromBase {
        bytes,
        percent: percent_change(current_size, baseline_size),
        change: change_of(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_diff_increase_against_baseline() {
        let diff = compute_diff(120, Some(100));
        assert_eq!(diff.bytes, 20);
        assert_eq!(diff.percent, 20.0);
        assert_eq!(diff.change, DiffChange::Increase);
    }

    #[test]
    fn test_compute_diff_decrease_has_negative_percent() {
        let diff = compute_diff(75, Some(100));
        assert_eq!(diff.bytes, -25);
        assert_eq!(diff.percent, -25.0);
        assert_eq!(diff.change, DiffChange::Decrease);
    }

    #[test]
    fn test_compute_diff_equal_sizes_is_no_change() {
        let diff = compute_diff(4096, Some(4096));
        assert_eq!(diff.bytes, 0);
        assert_eq!(diff.percent, 0.0);
        assert_eq!(diff.change, DiffChange::NoChange);
    }

    #[test]
    fn test_compute_diff_without_baseline_uses_sentinel_percent() {
        let diff = compute_diff(50, None);
        assert_eq!(diff.bytes, 50);
        assert_eq!(diff.percent, ZERO_BASELINE_PERCENT);
        assert_eq!(diff.change, DiffChange::Increase);
    }

    #[test]
    fn test_compute_diff_zero_baseline_counts_as_missing() {
        assert_eq!(compute_diff(50, Some(0)), compute_diff(50, None));
    }

    #[test]
    fn test_compute_diff_empty_entry_without_baseline_is_no_change() {
        let diff = compute_diff(0, None);
        assert_eq!(diff.bytes, 0);
        assert_eq!(diff.percent, 0.0);
        assert_eq!(diff.change, DiffChange::NoChange);
    }

    #[test]
    fn test_compute_diff_shrinking_to_zero_is_minus_hundred() {
        let diff = compute_diff(0, Some(300));
        assert_eq!(diff.bytes, -300);
        assert_eq!(diff.percent, -100.0);
        assert_eq!(diff.change, DiffChange::Decrease);
    }

    #[test]
    fn test_byte_delta_saturates_beyond_i64() {
        assert_eq!(byte_delta(u64::MAX, 0), i64::MAX);
        assert_eq!(byte_delta(0, u64::MAX), i64::MIN);
        assert_eq!(byte_delta(u64::MAX, u64::MAX - 5), 5);
    }

    #[test]
    fn test_compute_diff_huge_new_entry_is_still_an_increase() {
        let diff = compute_diff(1u64 << 63, None);
        assert_eq!(diff.bytes, i64::MAX);
        assert_eq!(diff.percent, ZERO_BASELINE_PERCENT);
        assert_eq!(diff.change, DiffChange::Increase);
    }

    use proptest::prelude::*;

    proptest! {
        /// Property: baseline + bytes reconstructs the current size
        #[test]
        fn prop_bytes_round_trip(current in 0u64..1_000_000_000, baseline in 0u64..1_000_000_000) {
            let diff = compute_diff(current, Some(baseline));
            prop_assert_eq!(baseline as i64 + diff.bytes, current as i64);
        }

        /// Property: percent follows bytes / baseline * 100 for a non-zero baseline
        #[test]
        fn prop_percent_formula(current in 0u64..1_000_000_000, baseline in 1u64..1_000_000_000) {
            let diff = compute_diff(current, Some(baseline));
            prop_assert_eq!(diff.percent, diff.bytes as f64 / baseline as f64 * 100.0);
        }

        /// Property: change direction agrees with the sign of bytes and percent
        #[test]
        fn prop_change_matches_sign(current in 0u64..10_000_000, baseline in 0u64..10_000_000) {
            let diff = compute_diff(current, Some(baseline));
            match diff.change {
                DiffChange::Increase => prop_assert!(diff.bytes > 0 && diff.percent > 0.0),
                DiffChange::Decrease => prop_assert!(diff.bytes < 0 && diff.percent < 0.0),
                DiffChange::NoChange => prop_assert!(diff.bytes == 0 && diff.percent == 0.0),
            }
        }

        /// Property: without a baseline every byte of the entry is new
        #[test]
        fn prop_no_baseline_bytes_equal_size(size in 0u64..1_000_000_000) {
            let diff = compute_diff(size, None);
            prop_assert_eq!(diff.bytes, size as i64);
            if size == 0 {
                prop_assert_eq!(diff.change, DiffChange::NoChange);
            } else {
                prop_assert_eq!(diff.change, DiffChange::Increase);
                prop_assert_eq!(diff.percent, ZERO_BASELINE_PERCENT);
            }
        }
    }
}
