//! jsonlog: addressable fields and text-log rendering for scanner log objects.
//!
//! # Example
//!
//! ```
//! use jsonlog::{ObjectHeader, Reference, TextlogFormatter, impl_record};
//!
//! #[derive(Default)]
//! struct File {
//!     header: ObjectHeader,
//!     path: String,
//!     size: u64,
//! }
//!
//! impl_record!(File {
//!     header: embed,
//!     path: ("path", "file"),
//!     size: ("size", "size,omitempty"),
//! });
//!
//! let file = File {
//!     path: "/tmp/x".into(),
//!     ..File::default()
//! };
//! let entry = TextlogFormatter::new().format(&file);
//! assert_eq!(entry.to_string(), "FILE: /tmp/x");
//!
//! let reference = Reference::to(&file, &file.path);
//! assert_eq!(reference.to_pointer().to_string(), "/path");
//! assert_eq!(reference.to_label(), "FILE");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod event;
mod invariants;
pub mod node;
pub mod object;
pub mod reference;
pub mod resolve;
pub mod textlog;
pub mod truncator;
pub mod values;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod reference_tests;

pub use jsonlog_core::{
    ContextError, Match, Pointer, PointerError, TRUNCATE_MARKER, TruncateLimits, smart_truncate,
    smart_truncate_bytes, string_match_context, truncate_with_newlines,
};

pub use event::{Event, ReferencedField, create_event};
pub use node::{
    AsNode, CustomFormatter, EventValue, EventValuer, Field, FieldAddr, FieldDescriptor,
    MODIFIER_EXPAND, MODIFIER_EXPLICIT, MODIFIER_OMITEMPTY, Node, Record, RelativeLabelProvider,
    RelativePointerProvider, Shape, unwrap_node,
};
pub use object::{
    DecodeError, Object, ObjectHeader, ObjectRegistry, ObjectRegistryBuilder, RegistryError,
    UnknownObject,
};
pub use reference::{FieldCitation, Reference, concat_labels, find_label, find_pointer};
pub use resolve::{ResolveError, ResolveResult, resolve, resolve_str};
pub use textlog::{TextlogEntry, TextlogFormatter, TextlogValuePair};
pub use truncator::{FieldMatch, Truncator, truncate_field, truncate_field_lines};
pub use values::{
    ArrowStringList, KeyValue, KeyValueList, MatchData, MatchString, MatchStrings, StringList,
};
