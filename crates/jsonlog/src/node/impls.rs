//! `Node` for standard and ecosystem types.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use super::{Node, Shape};

macro_rules! scalar_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf
                }

                fn display(&self) -> String {
                    self.to_string()
                }

                fn is_empty_value(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

scalar_node!(bool, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, String);

impl<T: Node> Node for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Wrapper(self.as_ref().map(|value| value as &dyn Node))
    }

    fn display(&self) -> String {
        self.as_ref().map(Node::display).unwrap_or_default()
    }
}

impl<T: Node> Node for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Wrapper(Some(&**self as &dyn Node))
    }

    fn display(&self) -> String {
        (**self).display()
    }
}

impl<T: Node> Node for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(|item| item as &dyn Node).collect())
    }

    fn display(&self) -> String {
        let items: Vec<String> = self.iter().map(Node::display).collect();
        format!("[{}]", items.join(" "))
    }
}

fn display_map<'a>(entries: impl Iterator<Item = (&'a String, &'a dyn Node)>) -> String {
    let items: Vec<String> = entries
        .map(|(key, value)| format!("{key}: {}", value.display()))
        .collect();
    format!("{{{}}}", items.join(", "))
}

impl<T: Node> Node for BTreeMap<String, T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect(),
        )
    }

    fn display(&self) -> String {
        display_map(self.iter().map(|(key, value)| (key, value as &dyn Node)))
    }
}

impl<T: Node> Node for IndexMap<String, T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect(),
        )
    }

    fn display(&self) -> String {
        display_map(self.iter().map(|(key, value)| (key, value as &dyn Node)))
    }
}

/// Timestamps render as RFC 3339 in UTC; the Unix epoch counts as empty.
impl Node for DateTime<Utc> {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn display(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn is_empty_value(&self) -> bool {
        *self == DateTime::<Utc>::default()
    }
}

/// Free-form JSON, as carried by objects of unregistered types.
impl Node for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;

        match self {
            Value::Null => Shape::Wrapper(None),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Leaf,
            Value::Array(items) => Shape::Seq(items.iter().map(|item| item as &dyn Node).collect()),
            Value::Object(map) => Shape::Map(
                map.iter()
                    .map(|(key, value)| (key.as_str(), value as &dyn Node))
                    .collect(),
            ),
        }
    }

    fn display(&self) -> String {
        match self {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn is_empty_value(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
        }
    }
}
