//! References from a root object to one of its fields.
//!
//! A [`Reference`] computes two names for its target on first use and caches
//! them:
//! - a JSON pointer into the serialized root,
//! - a text-log label as used by the formatter.
//!
//! Both walks follow the declared fields of records and the elements of
//! sequences, stopping at nodes that expose override hooks. String-keyed maps
//! are not walked; map-like types that need addressable entries implement the
//! hooks instead.

use std::cell::OnceCell;
use std::fmt;

use jsonlog_core::Pointer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::invariants::{ensure_reachable, ensure_resolved};
use crate::node::{FieldAddr, Node, Shape};
use crate::resolve::{ResolveError, resolve};

/// Join two label parts with `_`, collapsing empty and identical parts.
pub fn concat_labels(prefix: &str, label: &str) -> String {
    if prefix.is_empty() {
        return label.to_owned();
    }
    if label.is_empty() || prefix == label {
        return prefix.to_owned();
    }
    format!("{prefix}_{label}")
}

/// Pointer from `node` to `target`, or `None` if the target is not below it.
pub fn find_pointer(node: &dyn Node, target: FieldAddr) -> Option<Pointer> {
    if target.is(node) {
        return Some(Pointer::root());
    }
    if let Some(provider) = node.pointer_provider() {
        return provider.relative_pointer(target);
    }
    match node.shape() {
        Shape::Wrapper(inner) => find_pointer(inner?, target),
        Shape::Record(fields) => fields
            .iter()
            .filter(|f| f.descriptor.is_addressable())
            .find_map(|f| {
                let relative = find_pointer(f.value, target)?;
                if f.descriptor.embed {
                    Some(relative)
                } else {
                    Some(relative.prepend(f.descriptor.json))
                }
            }),
        Shape::Seq(items) => items.iter().enumerate().find_map(|(index, item)| {
            find_pointer(*item, target).map(|relative| relative.prepend(index.to_string()))
        }),
        Shape::Leaf | Shape::Map(_) => None,
    }
}

/// Label of `target` relative to `node`, or `None` if it is not below it.
pub fn find_label(node: &dyn Node, target: FieldAddr) -> Option<String> {
    if target.is(node) {
        return Some(String::new());
    }
    if let Some(provider) = node.label_provider() {
        return provider.relative_label(target);
    }
    match node.shape() {
        Shape::Wrapper(inner) => find_label(inner?, target),
        Shape::Record(fields) => fields
            .iter()
            .filter(|f| f.descriptor.is_addressable())
            .find_map(|f| {
                let child = find_label(f.value, target)?;
                let d = f.descriptor;
                Some(if d.embed {
                    child
                } else if d.is_expand() {
                    concat_labels(&d.label(), &child)
                } else if child.is_empty() {
                    d.label()
                } else {
                    child
                })
            }),
        Shape::Seq(items) => items.iter().enumerate().find_map(|(index, item)| {
            let child = find_label(*item, target)?;
            if child.is_empty() {
                Some(child)
            } else {
                Some(format!("{child}_{}", index + 1))
            }
        }),
        Shape::Leaf | Shape::Map(_) => None,
    }
}

/// A field of `root`, named lazily by pointer and label.
///
/// The root is borrowed; the cached names never change once computed. Not
/// `Sync`: a reference is rendered by one thread at a time.
pub struct Reference<'a> {
    root: &'a dyn Node,
    target: FieldAddr,
    pointer: OnceCell<Pointer>,
    label: OnceCell<String>,
}

impl<'a> Reference<'a> {
    pub fn new(root: &'a dyn Node, target: FieldAddr) -> Self {
        Self {
            root,
            target,
            pointer: OnceCell::new(),
            label: OnceCell::new(),
        }
    }

    /// Reference to `field`, which must live inside `root`.
    pub fn to<T: Node>(root: &'a dyn Node, field: &T) -> Self {
        Self::new(root, FieldAddr::of(field))
    }

    /// Reference with names that are already known.
    ///
    /// The names are trusted as given and not checked against the target.
    pub fn with_labels(root: &'a dyn Node, target: FieldAddr, pointer: Pointer, label: String) -> Self {
        Self {
            root,
            target,
            pointer: OnceCell::from(pointer),
            label: OnceCell::from(label),
        }
    }

    /// Reference whose pointer is known; the label is still computed on
    /// first use.
    pub(crate) fn with_pointer(root: &'a dyn Node, target: FieldAddr, pointer: Pointer) -> Self {
        Self {
            root,
            target,
            pointer: OnceCell::from(pointer),
            label: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &'a dyn Node {
        self.root
    }

    pub fn target(&self) -> FieldAddr {
        self.target
    }

    /// JSON pointer to the target. Panics if the target is unreachable.
    pub fn to_pointer(&self) -> &Pointer {
        self.pointer.get_or_init(|| {
            ensure_reachable(find_pointer(self.root, self.target), self.target, "pointer")
        })
    }

    /// Text-log label of the target. Panics if the target is unreachable.
    pub fn to_label(&self) -> &str {
        self.label.get_or_init(|| {
            ensure_reachable(find_label(self.root, self.target), self.target, "label")
        })
    }

    /// The target, located again through its pointer.
    pub fn value(&self) -> &'a dyn Node {
        ensure_resolved(resolve(self.root, self.to_pointer()))
    }

    /// Owned snapshot of both names.
    pub fn cite(&self) -> FieldCitation {
        FieldCitation {
            pointer: self.to_pointer().clone(),
            label: self.to_label().to_owned(),
        }
    }
}

impl fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_label())
    }
}

impl fmt::Debug for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("target", &self.target)
            .field("pointer", &self.pointer.get())
            .field("label", &self.label.get())
            .finish()
    }
}

impl Serialize for Reference<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_pointer().serialize(serializer)
    }
}

/// Owned pointer and label of a field, stored inside log objects.
///
/// Serializes as the pointer string only, so a deserialized citation has an
/// empty label until it is [bound](FieldCitation::bind) to its root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldCitation {
    pointer: Pointer,
    label: String,
}

impl FieldCitation {
    pub fn new(pointer: Pointer, label: impl Into<String>) -> Self {
        Self {
            pointer,
            label: label.into(),
        }
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Live reference to the cited field of `root`.
    pub fn bind<'a>(&self, root: &'a dyn Node) -> Result<Reference<'a>, ResolveError> {
        let node = resolve(root, &self.pointer)?;
        Ok(Reference::with_pointer(root, FieldAddr::of_node(node), self.pointer.clone()))
    }
}

impl Node for FieldCitation {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn display(&self) -> String {
        self.label.clone()
    }
}

impl Serialize for FieldCitation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.pointer.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldCitation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self {
            pointer: Pointer::deserialize(deserializer)?,
            label: String::new(),
        })
    }
}
