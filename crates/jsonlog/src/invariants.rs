//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::node::FieldAddr;

/// A reference target must be reachable from its root.
pub(crate) fn ensure_reachable<T>(found: Option<T>, target: FieldAddr, what: &str) -> T {
    found.unwrap_or_else(|| {
        panic!(
            "Reference: no {what} for {target:?} \
             (target must be a field reachable from the reference root)"
        )
    })
}

/// A pointer taken from a live reference must resolve against the same root.
pub(crate) fn ensure_resolved<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|err| panic!("Reference: own pointer does not resolve ({err})"))
}
