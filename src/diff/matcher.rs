//! Pairs current entries with their baseline counterparts
//!
//! Matching is by exact `path`. Baseline entries with no current counterpart
//! are collected in [`MatchResult::removed`] for logging only; they never
//! reach the report.

use super::types::FileDetails;
use std::collections::{HashMap, HashSet};

/// How a current entry relates to the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind<'a> {
    /// Baseline has an entry with the same path
    Matched(&'a FileDetails),
    /// No baseline counterpart (or no baseline at all)
    Added,
}

impl<'a> MatchKind<'a> {
    /// The baseline entry, if matched
    pub fn baseline(&self) -> Option<&'a FileDetails> {
        match self {
            MatchKind::Matched(base) => Some(*base),
            MatchKind::Added => None,
        }
    }
}

/// A current entry and its match
#[derive(Debug, Clone, Copy)]
pub struct MatchedEntry<'a> {
    /// Current measurement
    pub current: &'a FileDetails,
    /// Baseline relation
    pub kind: MatchKind<'a>,
}

/// Output of [`match_entries`]
#[derive(Debug, Clone, Default)]
pub struct MatchResult<'a> {
    /// One element per current entry, in input order
    pub entries: Vec<MatchedEntry<'a>>,
    /// Baseline entries absent from the current set
    pub removed: Vec<&'a FileDetails>,
}

impl MatchResult<'_> {
    /// Number of current entries with a baseline counterpart
    pub fn matched_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, MatchKind::Matched(_)))
            .count()
    }

    /// Number of current entries without a baseline counterpart
    pub fn added_count(&self) -> usize {
        self.entries.len() - self.matched_count()
    }
}

/// Align `current` with `baseline` by path
///
/// Duplicate paths in the baseline resolve to the first occurrence. Duplicate
/// paths in `current` are each matched independently.
///
/// # Examples
///
/// ```
/// use sizewatch::diff::matcher::{match_entries, MatchKind};
/// use sizewatch::diff::{Compression, FileDetails};
///
/// let current = vec![FileDetails::new("a.js", 120, Compression::Gzip)];
/// let baseline = vec![
///     FileDetails::new("a.js", 100, Compression::Gzip),
///     FileDetails::new("old.js", 30, Compression::Gzip),
/// ];
///
/// let result = match_entries(&current, Some(baseline.as_slice()));
/// assert!(matches!(result.entries[0].kind, MatchKind::Matched(b) if b.size == 100));
/// assert_eq!(result.removed.len(), 1);
/// ```
pub fn match_entries<'a>(
    current: &'a [FileDetails],
    baseline: Option<&'a [FileDetails]>,
) -> MatchResult<'a> {
    let Some(baseline) = baseline else {
        return MatchResult {
            entries: current
                .iter()
                .map(|current| MatchedEntry {
                    current,
                    kind: MatchKind::Added,
                })
                .collect(),
            removed: Vec::new(),
        };
    };

    let mut by_path: HashMap<&str, &FileDetails> = HashMap::with_capacity(baseline.len());
    for base in baseline {
        by_path.entry(base.path.as_str()).or_insert(base);
    }

    let entries = current
        .iter()
        .map(|current| MatchedEntry {
            current,
            kind: by_path
                .get(current.path.as_str())
                .copied()
                .map_or(MatchKind::Added, MatchKind::Matched),
        })
        .collect();

    let current_paths: HashSet<&str> = current.iter().map(|c| c.path.as_str()).collect();
    let removed = baseline
        .iter()
        .filter(|base| !current_paths.contains(base.path.as_str()))
        .collect();

    MatchResult { entries, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::Compression;

    fn entry(path: &str, size: u64) -> FileDetails {
        FileDetails::new(path, size, Compression::None)
    }

    #[test]
    fn test_match_without_baseline_marks_everything_added() {
        let current = vec![entry("a.js", 1), entry("b.js", 2)];
        let result = match_entries(&current, None);

        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.added_count(), 2);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_match_pairs_by_exact_path() {
        let current = vec![entry("a.js", 1), entry("b.js", 2)];
        let baseline = vec![entry("b.js", 5), entry("A.js", 9)];
        let result = match_entries(&current, Some(baseline.as_slice()));

        assert_eq!(result.entries[0].kind, MatchKind::Added);
        assert_eq!(result.entries[1].kind.baseline().unwrap().size, 5);
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn test_match_preserves_current_order() {
        let current = vec![entry("z.js", 1), entry("a.js", 2), entry("m.js", 3)];
        let baseline = vec![entry("a.js", 2), entry("m.js", 3), entry("z.js", 1)];
        let result = match_entries(&current, Some(baseline.as_slice()));

        let paths: Vec<&str> = result
            .entries
            .iter()
            .map(|e| e.current.path.as_str())
            .collect();
        assert_eq!(paths, vec!["z.js", "a.js", "m.js"]);
    }

    #[test]
    fn test_match_collects_baseline_only_entries_as_removed() {
        let current = vec![entry("a.js", 1)];
        let baseline = vec![entry("a.js", 1), entry("c.js", 30)];
        let result = match_entries(&current, Some(baseline.as_slice()));

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].path, "c.js");
    }

    #[test]
    fn test_match_duplicate_baseline_paths_use_first_occurrence() {
        let current = vec![entry("a.js", 1)];
        let baseline = vec![entry("a.js", 10), entry("a.js", 20)];
        let result = match_entries(&current, Some(baseline.as_slice()));

        assert_eq!(result.entries[0].kind.baseline().unwrap().size, 10);
    }

    #[test]
    fn test_match_duplicate_current_paths_match_independently() {
        let current = vec![entry("a.js", 1), entry("a.js", 2)];
        let baseline = vec![entry("a.js", 10)];
        let result = match_entries(&current, Some(baseline.as_slice()));

        assert_eq!(result.matched_count(), 2);
    }

    #[test]
    fn test_match_with_empty_baseline_marks_everything_added() {
        let current = vec![entry("a.js", 1)];
        let result = match_entries(&current, Some(&[][..]));

        assert_eq!(result.added_count(), 1);
    }
}
