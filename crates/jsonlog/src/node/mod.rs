//! Structural view of log objects.
//!
//! Every value reachable from a log object implements [`Node`], which exposes
//! a [`Shape`]: leaf, record with declared fields, sequence, string-keyed map
//! or optional wrapper. Pointer and label computation, resolution, the
//! text-log formatter and the event flattener all walk this view and never
//! inspect concrete types.
//!
//! Field identity is an address plus a type ([`FieldAddr`]). The type is
//! needed because a record and its first field can share an address.

mod descriptor;
mod hooks;
mod impls;


use std::any::{Any, TypeId};

pub use descriptor::{
    Field, FieldDescriptor, MODIFIER_EXPAND, MODIFIER_EXPLICIT, MODIFIER_OMITEMPTY, Record,
};
pub use hooks::{CustomFormatter, EventValue, EventValuer, RelativeLabelProvider, RelativePointerProvider};

/// Upcasts shared by every [`Node`].
///
/// Implemented for all nodes; never implement it by hand.
pub trait AsNode {
    fn as_node(&self) -> &dyn Node;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Node> AsNode for T {
    fn as_node(&self) -> &dyn Node {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value inside a log object.
pub trait Node: AsNode + 'static {
    /// Structural view used by every traversal.
    fn shape(&self) -> Shape<'_>;

    /// Generic rendering used when no value formatter overrides it.
    fn display(&self) -> String;

    /// Whether `omitempty` treats this value as absent.
    ///
    /// Leaves are never empty unless they override this; containers are
    /// empty when they hold nothing, records when all fields are empty.
    fn is_empty_value(&self) -> bool {
        match self.shape() {
            Shape::Leaf => false,
            Shape::Record(fields) => fields.iter().all(|f| f.value.is_empty_value()),
            Shape::Seq(items) => items.is_empty(),
            Shape::Map(entries) => entries.is_empty(),
            Shape::Wrapper(inner) => inner.is_none(),
        }
    }

    fn pointer_provider(&self) -> Option<&dyn RelativePointerProvider> {
        None
    }

    fn label_provider(&self) -> Option<&dyn RelativeLabelProvider> {
        None
    }

    fn custom_formatter(&self) -> Option<&dyn CustomFormatter> {
        None
    }

    fn event_valuer(&self) -> Option<&dyn EventValuer> {
        None
    }
}

/// How a node is traversed.
pub enum Shape<'a> {
    /// Rendered as a single value.
    Leaf,
    /// Declared fields in declaration order.
    Record(Vec<Field<'a>>),
    /// Elements in index order.
    Seq(Vec<&'a dyn Node>),
    /// Entries in iteration order.
    Map(Vec<(&'a str, &'a dyn Node)>),
    /// Optional or boxed value, transparent to traversal.
    Wrapper(Option<&'a dyn Node>),
}

/// Identity of a field inside a borrowed object graph.
///
/// Only meaningful while the graph it was taken from is alive and unmoved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldAddr {
    addr: usize,
    ty: TypeId,
}

impl FieldAddr {
    /// Address of a concrete field.
    pub fn of<T: Node>(field: &T) -> Self {
        Self {
            addr: field as *const T as *const () as usize,
            ty: TypeId::of::<T>(),
        }
    }

    /// Address of a node seen through the structural view.
    pub fn of_node(node: &dyn Node) -> Self {
        Self {
            addr: node as *const dyn Node as *const () as usize,
            ty: node.as_any().type_id(),
        }
    }

    /// Whether this addresses `node`.
    pub fn is(&self, node: &dyn Node) -> bool {
        *self == Self::of_node(node)
    }
}

/// Follow wrappers down to the first non-wrapper node.
///
/// Returns `None` for an absent wrapper.
pub fn unwrap_node(mut node: &dyn Node) -> Option<&dyn Node> {
    loop {
        match node.shape() {
            Shape::Wrapper(Some(inner)) => node = inner,
            Shape::Wrapper(None) => return None,
            _ => return Some(node),
        }
    }
}
