//! Match-preserving truncation of long text values.
//!
//! Values are cut down to a byte budget while every retained match stays
//! fully visible together with some surrounding context. Removed spans are
//! replaced by [`TRUNCATE_MARKER`].
//!
//! The engine works on intervals of the input:
//! - each match is widened by `context` bytes on both sides,
//! - overlapping intervals are merged,
//! - leftover budget is spent on the head and tail of the value and on the
//!   gaps between intervals.
//!
//! If the result is still too large, context is reduced and then the largest
//! matches are dropped. The output is not hard-capped: with a limit shorter
//! than the marker itself the result may still exceed it, and callers
//! re-truncate downstream.

mod context;
mod interval;
mod lines;
mod smart;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod interval_tests;
#[cfg(test)]
mod lines_tests;

use serde::Deserialize;

pub use context::{ContextError, string_match_context};
pub use interval::{Interval, reduce_intervals};
pub use lines::truncate_with_newlines;
pub use smart::{smart_truncate, smart_truncate_bytes};

/// Inserted wherever bytes were removed.
pub const TRUNCATE_MARKER: &str = "[...]";

/// A run of bytes inside a value that must survive truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the match inside the value.
    pub offset: usize,
    /// The matched bytes.
    pub data: Vec<u8>,
}

impl Match {
    pub fn new(offset: usize, data: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            data: data.into(),
        }
    }

    /// Offset one past the last matched byte.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.data.len())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Size budget for truncated values.
///
/// A `limit` of zero disables truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TruncateLimits {
    /// Maximum size of a value in bytes (default: 2,048).
    pub(crate) limit: usize,
    /// Bytes kept on each side of a match (default: 10).
    pub(crate) context: usize,
}

impl Default for TruncateLimits {
    fn default() -> Self {
        Self {
            limit: 2048,
            context: 10,
        }
    }
}

impl TruncateLimits {
    /// Create limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the context kept around matches.
    pub fn context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    pub fn get_limit(&self) -> usize {
        self.limit
    }
    pub fn get_context(&self) -> usize {
        self.context
    }
}
