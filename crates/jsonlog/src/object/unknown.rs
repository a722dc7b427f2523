use serde::Serialize;
use serde_json::{Map, Value};

use super::registry::DecodeError;
use super::{Object, ObjectHeader};
use crate::node::{CustomFormatter, Node, Shape};
use crate::reference::concat_labels;
use crate::textlog::{TextlogEntry, TextlogFormatter};

/// An object whose type is not registered, kept as free-form JSON.
///
/// The text log flattens nested members into `PARENT_CHILD` labels and
/// array elements into one-based suffixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UnknownObject {
    #[serde(skip)]
    header: ObjectHeader,
    data: Map<String, Value>,
}

impl UnknownObject {
    /// Keep `value` as is; its `type` and `summary` members form the header.
    pub fn from_json(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(data) = value else {
            return Err(DecodeError::NoLogObject);
        };
        let member = |key: &str| data.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();
        let header = ObjectHeader::new(member("type")).with_summary(member("summary"));
        Ok(Self { header, data })
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl Object for UnknownObject {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl Node for UnknownObject {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.data
                .iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect(),
        )
    }

    fn display(&self) -> String {
        self.format_textlog(&TextlogFormatter::new()).to_string()
    }

    fn custom_formatter(&self) -> Option<&dyn CustomFormatter> {
        Some(self)
    }
}

impl CustomFormatter for UnknownObject {
    fn format_textlog(&self, formatter: &TextlogFormatter) -> TextlogEntry {
        let mut entry = TextlogEntry::new();
        flatten_members(formatter, "", &self.data, &mut entry);
        entry
    }
}

fn flatten_members(formatter: &TextlogFormatter, prefix: &str, members: &Map<String, Value>, out: &mut TextlogEntry) {
    for (key, value) in members {
        let mut member = TextlogEntry::new();
        flatten(formatter, key, value, &mut member);
        for pair in member {
            out.push(concat_labels(prefix, &pair.key), pair.value);
        }
    }
}

fn flatten(formatter: &TextlogFormatter, key: &str, value: &Value, out: &mut TextlogEntry) {
    match value {
        Value::Object(members) => flatten_members(formatter, key, members, out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let suffix = (index + 1).to_string();
                let mut element = TextlogEntry::new();
                flatten(formatter, key, item, &mut element);
                for pair in element {
                    out.push(concat_labels(&pair.key, &suffix), pair.value);
                }
            }
        }
        scalar => out.push(key, formatter.format_value(scalar, &[])),
    }
}
