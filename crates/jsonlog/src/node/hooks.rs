//! Override hooks a node can expose instead of its structural view.

use jsonlog_core::Pointer;

use super::FieldAddr;
use crate::textlog::{TextlogEntry, TextlogFormatter};

/// Computes pointers to fields below a node.
///
/// When a node exposes this hook, the result fully determines the pointer
/// for every target below it; the structural walk does not descend.
pub trait RelativePointerProvider {
    /// Pointer from this node to `target`, or `None` if it is not below.
    fn relative_pointer(&self, target: FieldAddr) -> Option<Pointer>;
}

/// Computes labels for fields below a node. Labels are used verbatim.
pub trait RelativeLabelProvider {
    fn relative_label(&self, target: FieldAddr) -> Option<String>;
}

/// Replaces the text-log formatting of a node and its descendants.
///
/// Returned labels are upper-cased by the caller.
pub trait CustomFormatter {
    fn format_textlog(&self, formatter: &TextlogFormatter) -> TextlogEntry;
}

/// One value listed by an [`EventValuer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventValue {
    pub field: FieldAddr,
    pub value: String,
    /// Label relative to the owning node, used verbatim.
    pub label: String,
    /// Pointer relative to the owning node.
    pub pointer: Pointer,
}

/// Lists the event values of a node instead of the structural walk.
pub trait EventValuer {
    fn event_values(&self) -> Vec<EventValue>;
}
