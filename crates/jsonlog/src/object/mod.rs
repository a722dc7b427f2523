//! Log objects: records carrying an [`ObjectHeader`].

mod registry;
mod unknown;


use serde::{Deserialize, Serialize};

pub use registry::{DecodeError, ObjectRegistry, ObjectRegistryBuilder, RegistryError, global, install_global};
pub use unknown::UnknownObject;

use crate::node::Node;

/// Header embedded in every log object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHeader {
    /// Human-readable summary of the object's contents.
    #[serde(default)]
    pub summary: String,
    /// Object type name, unique across all log objects.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ObjectHeader {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            summary: String::new(),
            type_name: type_name.into(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

crate::impl_record!(ObjectHeader {
    summary: ("summary", ""),
    type_name: ("type", ""),
});

/// A top-level log object.
pub trait Object: Node {
    fn header(&self) -> &ObjectHeader;

    fn type_name(&self) -> &str {
        &self.header().type_name
    }
}
