//! Truncating field values with matches attributed to fields.

use jsonlog_core::{Match, TruncateLimits, smart_truncate, truncate_with_newlines};

use crate::node::{FieldAddr, Node};

/// A match inside the value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: FieldAddr,
    pub data: Match,
}

impl FieldMatch {
    pub fn new(field: FieldAddr, data: Match) -> Self {
        Self { field, data }
    }

    /// Match inside `field`.
    pub fn for_field<T: Node>(field: &T, data: Match) -> Self {
        Self::new(FieldAddr::of(field), data)
    }
}

/// Matches attributed to `field`, by value.
pub(crate) fn matches_for(field: FieldAddr, matches: &[FieldMatch]) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.field == field)
        .map(|m| m.data.clone())
        .collect()
}

/// Values that can shrink to a byte budget while keeping their matches.
pub trait Truncator: Sized {
    /// Truncated copy of `self`, keeping the matches attributed to it.
    fn truncate(&self, matches: &[FieldMatch], limits: &TruncateLimits) -> Self;
}

impl Truncator for String {
    fn truncate(&self, matches: &[FieldMatch], limits: &TruncateLimits) -> Self {
        let own = matches_for(FieldAddr::of(self), matches);
        smart_truncate(self, &own, limits.get_limit(), limits.get_context())
    }
}

/// Truncate `field` in place.
///
/// `field` must be borrowed from where the matches were attributed, since
/// matches are looked up by its address.
pub fn truncate_field<T: Truncator>(field: &mut T, matches: &[FieldMatch], limits: &TruncateLimits) {
    *field = field.truncate(matches, limits);
}

/// Truncate a multi-line `field` in place, keeping whole lines around matches.
pub fn truncate_field_lines(field: &mut String, matches: &[FieldMatch], limits: &TruncateLimits) {
    let own = matches_for(FieldAddr::of(&*field), matches);
    *field = truncate_with_newlines(field, &own, limits.get_limit(), limits.get_context());
}
