//! Single-pass interval truncation and the adaptive driver around it.

use tracing::debug;

use super::interval::{Interval, reduce_intervals, truncated_length};
use super::{Match, TRUNCATE_MARKER};

/// Byte ranges of a `len` byte value that stay visible when it is cut to
/// roughly `limit` bytes, keeping every match in `matches` together with
/// `context` bytes on either side.
///
/// Unlike [`smart_truncate_bytes`] this never gives up context or matches,
/// so the rendered result may be longer than `limit`. Interval bounds are
/// moved inward onto positions accepted by `boundary`.
pub(crate) fn keep_intervals(
    len: usize,
    matches: &[&Match],
    limit: usize,
    context: usize,
    boundary: impl Fn(usize) -> bool,
) -> Vec<Interval> {
    if limit == 0 || len <= limit {
        return vec![Interval::new(0, len)];
    }

    let intervals = matches
        .iter()
        .map(|m| {
            Interval::new(
                m.offset.saturating_sub(context).min(len),
                m.end().saturating_add(context).min(len),
            )
        })
        .collect();
    let mut intervals = reduce_intervals(intervals);

    // Spend what is left of the budget on the head and tail.
    let remaining = limit.saturating_sub(truncated_length(&intervals, len));
    intervals.push(Interval::new(0, remaining / 2));
    intervals.push(Interval::new(len - remaining / 2, len));
    let mut intervals = reduce_intervals(intervals);

    // Then widen intervals to the right until the budget is used up.
    let mut remaining = limit.saturating_sub(truncated_length(&intervals, len));
    for i in 1..intervals.len() {
        if remaining == 0 {
            break;
        }
        let grow = (intervals[i].from - intervals[i - 1].to).min(remaining);
        intervals[i - 1].to += grow;
        remaining -= grow;
    }
    if let Some(last) = intervals.last_mut() {
        last.to += (len - last.to).min(remaining);
    }

    let snapped = reduce_intervals(intervals)
        .into_iter()
        .map(|interval| {
            let mut from = interval.from;
            while from < interval.to && !boundary(from) {
                from += 1;
            }
            let mut to = interval.to;
            while to > from && !boundary(to) {
                to -= 1;
            }
            Interval::new(from, to)
        })
        .collect();
    reduce_intervals(snapped)
}

fn render(data: &[u8], intervals: &[Interval]) -> Vec<u8> {
    let marker = TRUNCATE_MARKER.as_bytes();
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return marker.to_vec();
    };

    let mut out = Vec::with_capacity(data.len());
    if first.from > 0 {
        out.extend_from_slice(marker);
    }
    for (i, interval) in intervals.iter().enumerate() {
        if i != 0 {
            out.extend_from_slice(marker);
        }
        out.extend_from_slice(&data[interval.from..interval.to]);
    }
    if last.to < data.len() {
        out.extend_from_slice(marker);
    }
    out
}

fn render_str(data: &str, intervals: &[Interval]) -> String {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return TRUNCATE_MARKER.to_owned();
    };

    let mut out = String::with_capacity(data.len());
    if first.from > 0 {
        out.push_str(TRUNCATE_MARKER);
    }
    for (i, interval) in intervals.iter().enumerate() {
        if i != 0 {
            out.push_str(TRUNCATE_MARKER);
        }
        out.push_str(&data[interval.from..interval.to]);
    }
    if last.to < data.len() {
        out.push_str(TRUNCATE_MARKER);
    }
    out
}

/// Truncate `data` to at most `limit` bytes while keeping matches visible.
///
/// Context is reduced first; once that alone cannot reach the limit, the
/// largest remaining match is dropped and the process repeats. A `limit` of
/// zero returns `data` unchanged.
pub fn smart_truncate_bytes(data: &[u8], matches: &[Match], limit: usize, context: usize) -> Vec<u8> {
    shrink(data.len(), matches, limit, context, |kept, context| {
        render(data, &keep_intervals(data.len(), kept, limit, context, |_| true))
    })
}

/// String form of [`smart_truncate_bytes`].
///
/// Offsets in `matches` are byte offsets into `data`. Cuts only fall on
/// character boundaries, so a partial character at a cut is dropped.
pub fn smart_truncate(data: &str, matches: &[Match], limit: usize, context: usize) -> String {
    if limit == 0 {
        return data.to_owned();
    }

    // Dropping partial characters can leave a cut short of a marker it was
    // budgeted without, so retry with a tighter budget until the result fits.
    let mut budget = limit;
    loop {
        let out = shrink(data.len(), matches, budget, context, |kept, context| {
            let intervals = keep_intervals(data.len(), kept, budget, context, |pos| data.is_char_boundary(pos));
            render_str(data, &intervals)
        });
        if out.len() <= limit || budget == 1 {
            return out;
        }
        budget = budget.saturating_sub(out.len() - limit).max(1);
        debug!(len = out.len(), limit, budget, "tightened budget after character boundary cuts");
    }
}

/// Context reduction and match dropping around a single rendering `attempt`.
fn shrink<T: AsRef<[u8]>>(
    len: usize,
    matches: &[Match],
    limit: usize,
    context: usize,
    attempt: impl Fn(&[&Match], usize) -> T,
) -> T {
    let mut matches: Vec<&Match> = matches.iter().collect();
    matches.sort_by_key(|m| m.len());
    let mut context = context.min(len);

    loop {
        let out = attempt(&matches, context);
        let out_len = out.as_ref().len();
        if limit == 0 || out_len <= limit || matches.is_empty() {
            return out;
        }

        let count = matches.len();
        let overshoot = out_len - limit;
        if context > 0 && out_len.saturating_sub(context.saturating_mul(2).saturating_mul(count)) <= limit {
            let reduction = overshoot.div_ceil(2 * count).max(1);
            context = context.saturating_sub(reduction);
            debug!(len = out_len, limit, context, "reduced truncation context");
            continue;
        }

        matches.pop();
        debug!(len = out_len, limit, remaining = matches.len(), "dropped largest match");
    }
}
