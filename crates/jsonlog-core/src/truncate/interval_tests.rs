use crate::truncate::interval::truncated_length;
use crate::truncate::{Interval, reduce_intervals};

fn iv(from: usize, to: usize) -> Interval {
    Interval::new(from, to)
}

#[test]
fn reduce_merges_overlapping_and_touching() {
    let reduced = reduce_intervals(vec![iv(10, 15), iv(0, 5), iv(3, 8), iv(8, 9)]);
    assert_eq!(reduced, [iv(0, 9), iv(10, 15)]);
}

#[test]
fn reduce_drops_empty_intervals() {
    let reduced = reduce_intervals(vec![iv(4, 4), iv(7, 2), iv(1, 3)]);
    assert_eq!(reduced, [iv(1, 3)]);
    assert!(reduce_intervals(Vec::new()).is_empty());
}

#[test]
fn reduce_keeps_contained_intervals_inside() {
    let reduced = reduce_intervals(vec![iv(0, 20), iv(5, 6), iv(19, 25)]);
    assert_eq!(reduced, [iv(0, 25)]);
}

#[test]
fn reduce_preserves_coverage() {
    let input = vec![iv(2, 6), iv(30, 31), iv(5, 12), iv(14, 14), iv(20, 29), iv(29, 30)];
    let reduced = reduce_intervals(input.clone());

    for pos in 0..40 {
        let before = input.iter().any(|i| i.contains(pos));
        let after = reduced.iter().any(|i| i.contains(pos));
        assert_eq!(before, after, "position {pos}");
    }
    for pair in reduced.windows(2) {
        assert!(pair[0].to < pair[1].from);
    }
}

#[test]
fn length_of_nothing_is_one_marker() {
    assert_eq!(truncated_length(&[], 100), 5);
}

#[test]
fn length_counts_gap_markers() {
    assert_eq!(truncated_length(&[iv(0, 4), iv(10, 20)], 20), 4 + 10 + 5);
}

#[test]
fn length_counts_head_and_tail_markers_for_large_cuts() {
    // Head cut of 15 exceeds half the kept length.
    assert_eq!(truncated_length(&[iv(15, 21)], 21), 6 + 5);
    // Tail cut of 12 exceeds half the kept length.
    assert_eq!(truncated_length(&[iv(0, 9)], 21), 9 + 5);
    // A short tail cut is not counted.
    assert_eq!(truncated_length(&[iv(0, 20)], 21), 20);
}
