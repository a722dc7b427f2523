#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Leaf building blocks for jsonlog rendering.
//!
//! Two independent pieces:
//! - **Pointers** (`Pointer`): RFC 6901 paths that address a field in the
//!   JSON form of a log object.
//! - **Truncation** (`truncate`): size-bounded compression of long strings
//!   that keeps the byte ranges of signature matches visible.

pub mod pointer;
pub mod truncate;


pub use pointer::{Pointer, PointerError};
pub use truncate::{
    ContextError, Interval, Match, TRUNCATE_MARKER, TruncateLimits, reduce_intervals,
    smart_truncate, smart_truncate_bytes, string_match_context, truncate_with_newlines,
};
