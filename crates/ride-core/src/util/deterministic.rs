//! Deterministic ordering helpers.
//!
//! Hash-based grouping leaves entries in arbitrary order. Everything that
//! reaches a report goes through one of these sorts first, so identical
//! inputs always serialize identically.

use crate::report::model::CategoryCount;

/// Sort counts by `count` descending, then `label` ascending.
pub fn sort_counts(counts: &mut [CategoryCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
}

/// Sort rows by a count key descending, then a name key ascending.
pub fn sort_by_count_then_name<T>(rows: &mut [T], count: impl Fn(&T) -> u64, name: impl Fn(&T) -> &str) {
    rows.sort_by(|a, b| count(b).cmp(&count(a)).then_with(|| name(a).cmp(name(b))));
}
