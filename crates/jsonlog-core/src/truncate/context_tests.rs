use std::io::Cursor;

use crate::truncate::{ContextError, Match, string_match_context};

const DATA: &[u8] = b"0123456789MATCH0123456789";

#[test]
fn widens_match_on_both_sides() {
    let mut source = Cursor::new(DATA);
    let widened = string_match_context(&mut source, 3, &Match::new(10, "MATCH")).unwrap();

    assert_eq!(widened, Match::new(7, "789MATCH012"));
}

#[test]
fn context_is_clipped_at_the_start() {
    let mut source = Cursor::new(DATA);
    let widened = string_match_context(&mut source, 4, &Match::new(2, "23")).unwrap();

    assert_eq!(widened, Match::new(0, "01234567"));
}

#[test]
fn context_is_clipped_at_the_end() {
    let mut source = Cursor::new(DATA);
    let widened = string_match_context(&mut source, 5, &Match::new(22, "789")).unwrap();

    assert_eq!(widened, Match::new(17, "23456789"));
}

#[test]
fn mismatching_source_is_rejected() {
    let mut source = Cursor::new(DATA);
    let err = string_match_context(&mut source, 3, &Match::new(10, "OTHER")).unwrap_err();

    assert!(matches!(err, ContextError::Mismatch));
}

#[test]
fn short_source_is_rejected() {
    let mut source = Cursor::new(DATA);
    let err = string_match_context(&mut source, 3, &Match::new(23, "89xx")).unwrap_err();

    assert!(matches!(err, ContextError::Insufficient));
}

#[test]
fn source_without_context_is_rejected() {
    let mut source = Cursor::new(b"MATCH".as_slice());
    let err = string_match_context(&mut source, 3, &Match::new(0, "MATCH")).unwrap_err();

    assert!(matches!(err, ContextError::NoContext));
    assert_eq!(err.to_string(), "no context available");
}
