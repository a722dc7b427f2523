//! Reusable value types found in many log objects.

mod kvlist;
mod match_string;
mod string_list;


pub use kvlist::{KeyValue, KeyValueList};
pub use match_string::{MAX_MATCH_STRINGS, MatchData, MatchString, MatchStrings};
pub use string_list::{ArrowStringList, StringList};
