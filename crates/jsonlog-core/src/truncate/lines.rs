use super::interval::{Interval, reduce_intervals};
use super::smart::smart_truncate;
use super::{Match, TRUNCATE_MARKER};

/// Truncate a multi-line value down to the lines that contain matches.
///
/// Each line holding a match is kept and truncated on its own with
/// [`smart_truncate`]. Kept lines are joined with the marker, and any
/// newline left in the result is replaced by it as well. Without matches,
/// the whole value is kept and only newlines are replaced.
pub fn truncate_with_newlines(data: &str, matches: &[Match], limit: usize, context: usize) -> String {
    let bytes = data.as_bytes();
    if matches.is_empty() {
        return replace_newlines(data);
    }

    let len = bytes.len();
    let lines = matches
        .iter()
        .map(|m| {
            let start = m.offset.min(len);
            let end = m.end().min(len);
            let from = bytes[..start]
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(0, |pos| pos + 1);
            let to = bytes[end..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(len, |pos| end + pos);
            Interval::new(from, to)
        })
        .collect();

    // Lines start after a newline and end before one, so they are valid
    // string slices.
    let mut out = String::new();
    for (i, line) in reduce_intervals(lines).into_iter().enumerate() {
        if i != 0 {
            out.push_str(TRUNCATE_MARKER);
        }
        let local: Vec<Match> = matches
            .iter()
            .filter(|m| m.offset >= line.from && m.end() <= line.to)
            .map(|m| Match::new(m.offset - line.from, m.data.clone()))
            .collect();
        out.push_str(&smart_truncate(&data[line.from..line.to], &local, limit, context));
    }
    replace_newlines(&out)
}

fn replace_newlines(data: &str) -> String {
    data.replace('\n', TRUNCATE_MARKER)
}
