//! Pointer resolution against the structural view.

use jsonlog_core::{Pointer, PointerError};
use tracing::debug;

use crate::node::{Field, Node, Shape};

/// Errors produced while resolving a pointer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("pointer {pointer} does not resolve: no member {token:?}")]
    Unresolved { pointer: Pointer, token: String },
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Locate the node `pointer` addresses inside `root`.
///
/// Record members match by JSON name, with embedded records searched after
/// direct members. Map entries match by key and sequence elements by
/// decimal index. Wrappers are stepped through; an absent one fails.
pub fn resolve<'a>(root: &'a dyn Node, pointer: &Pointer) -> ResolveResult<&'a dyn Node> {
    let mut node = root;
    for token in pointer {
        node = step(node, token).ok_or_else(|| {
            debug!(%pointer, token = token.as_str(), "pointer does not resolve");
            ResolveError::Unresolved {
                pointer: pointer.clone(),
                token: token.clone(),
            }
        })?;
    }
    Ok(node)
}

/// Parse `pointer` and resolve it.
pub fn resolve_str<'a>(root: &'a dyn Node, pointer: &str) -> ResolveResult<&'a dyn Node> {
    resolve(root, &Pointer::parse(pointer)?)
}

fn step<'a>(node: &'a dyn Node, token: &str) -> Option<&'a dyn Node> {
    match node.shape() {
        Shape::Wrapper(inner) => step(inner?, token),
        Shape::Record(fields) => member(&fields, token),
        Shape::Map(entries) => entries
            .into_iter()
            .find(|(key, _)| *key == token)
            .map(|(_, value)| value),
        Shape::Seq(items) => items.get(parse_index(token)?).copied(),
        Shape::Leaf => None,
    }
}

fn member<'a>(fields: &[Field<'a>], token: &str) -> Option<&'a dyn Node> {
    let direct = fields
        .iter()
        .find(|f| !f.descriptor.embed && f.descriptor.json == token && f.descriptor.is_addressable());
    if let Some(field) = direct {
        return Some(field.value);
    }
    fields
        .iter()
        .filter(|f| f.descriptor.embed)
        .find_map(|f| step(f.value, token))
}

/// Array indices are decimal without leading zeros.
fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}
