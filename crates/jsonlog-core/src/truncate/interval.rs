//! Half-open byte intervals and the length model used for budgeting.

use super::TRUNCATE_MARKER;

/// Byte range `[from, to)` of a value that stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub from: usize,
    pub to: usize,
}

impl Interval {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }
}

/// Merge overlapping and touching intervals.
///
/// The result is sorted by `from`, pairwise disjoint, free of empty
/// intervals, and covers exactly the positions covered by the input.
pub fn reduce_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_unstable();

    let mut reduced: Vec<Interval> = Vec::with_capacity(intervals.len());
    for next in intervals {
        if next.is_empty() {
            continue;
        }
        match reduced.last_mut() {
            Some(last) if next.from <= last.to => {
                last.to = last.to.max(next.to);
            }
            _ => reduced.push(next),
        }
    }
    reduced
}

/// Estimated output length when only `intervals` of a `data_len` byte value
/// are kept.
///
/// Every gap between intervals costs one marker. Head and tail markers are
/// only counted when the cut-off run is larger than half the running length,
/// which keeps short leading and trailing gaps from eating the budget.
/// Without any interval the value collapses to a single marker.
pub(crate) fn truncated_length(intervals: &[Interval], data_len: usize) -> usize {
    let marker = TRUNCATE_MARKER.len();

    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return marker;
    };

    let mut length = 0;
    for (i, interval) in intervals.iter().enumerate() {
        length += interval.len();
        if i != 0 && interval.from > intervals[i - 1].to {
            length += marker;
        }
    }
    if first.from > 0 && first.from > length / 2 {
        length += marker;
    }
    if last.to < data_len && last.to + length / 2 < data_len {
        length += marker;
    }
    length
}
