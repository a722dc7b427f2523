use crate::truncate::{Match, truncate_with_newlines};

fn m(offset: usize, data: &str) -> Match {
    Match::new(offset, data)
}

const LINES: &str = "aaab\nbbbc\ncccd\naaab";

#[test]
fn without_matches_only_newlines_are_replaced() {
    assert_eq!(
        truncate_with_newlines("aaaaaaaaaaa\naaaaaaaaa", &[], 0, 10),
        "aaaaaaaaaaa[...]aaaaaaaaa"
    );
}

#[test]
fn keeps_only_lines_with_matches() {
    assert_eq!(truncate_with_newlines(LINES, &[m(0, "aaab")], 0, 10), "aaab");
    assert_eq!(
        truncate_with_newlines(LINES, &[m(5, "bbbc"), m(10, "cccd")], 0, 10),
        "bbbc[...]cccd"
    );
    assert_eq!(
        truncate_with_newlines(LINES, &[m(0, "aa"), m(15, "aa")], 0, 10),
        "aaab[...]aaab"
    );
}

#[test]
fn multi_line_match_keeps_all_its_lines() {
    assert_eq!(
        truncate_with_newlines(LINES, &[m(0, "aaab\nbbbc")], 0, 10),
        "aaab[...]bbbc"
    );
    assert_eq!(
        truncate_with_newlines(LINES, &[m(0, "aaab\nbbbc"), m(5, "bbbc")], 0, 10),
        "aaab[...]bbbc"
    );
    assert_eq!(
        truncate_with_newlines(LINES, &[m(0, LINES)], 0, 10),
        "aaab[...]bbbc[...]cccd[...]aaab"
    );
}

#[test]
fn single_line_value() {
    assert_eq!(truncate_with_newlines("aaab", &[m(0, "aaab")], 0, 10), "aaab");
}

#[test]
fn long_lines_are_truncated_individually() {
    let data = "aaaaaaaaaaaaaaabbbbbbbbbbbbbbbbb\nbbbc\ncccd\naaab";
    assert_eq!(
        truncate_with_newlines(data, &[m(12, "aaab")], 15, 5),
        "[...]aaabb[...]"
    );
    assert_eq!(truncate_with_newlines(data, &[m(12, "aaab")], 10, 5), "aaa[...]bb");
}

#[test]
fn out_of_range_match_clamps_to_last_line() {
    assert_eq!(truncate_with_newlines("ab\ncd", &[m(100, "zz")], 0, 2), "cd");
}

#[test]
fn multi_byte_lines_are_cut_on_character_boundaries() {
    assert_eq!(truncate_with_newlines("é\né", &[], 0, 10), "é[...]é");

    let data = format!("{}MATCH{}\nzz", "é".repeat(20), "é".repeat(20));
    let out = truncate_with_newlines(&data, &[m(40, "MATCH")], 21, 3);
    assert_eq!(out, "[...]éMATCHé[...]");
    assert!(out.len() <= 21);
    assert!(!out.contains('\u{FFFD}'));
}
