use std::fmt;

use jsonlog_core::{Pointer, TRUNCATE_MARKER, TruncateLimits, smart_truncate};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::node::{EventValue, EventValuer, FieldAddr, Node, RelativeLabelProvider, RelativePointerProvider, Shape};
use crate::truncator::{FieldMatch, Truncator, matches_for};

/// Bytes a rendered entry needs beyond its key and value.
const ENTRY_OVERHEAD: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Ordered key/value pairs, serialized as a JSON object.
///
/// Keys may repeat. Entries are addressed by key: the value of an entry has
/// the pointer `/key` and the label `key` relative to the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueList(Vec<KeyValue>);

impl KeyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(KeyValue {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Value of the first entry with `key`.
    pub fn find(&self, key: &str) -> Option<&String> {
        self.0.iter().find(|kv| kv.key == key).map(|kv| &kv.value)
    }

    pub fn entries(&self) -> &[KeyValue] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn entry_for(&self, target: FieldAddr) -> Option<&KeyValue> {
        self.0.iter().find(|kv| FieldAddr::of(&kv.value) == target)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (key, value) in iter {
            list.push(key, value);
        }
        list
    }
}

impl fmt::Display for KeyValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kv) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str("  ")?;
            }
            write!(f, "{}: {}", kv.key, kv.value)?;
        }
        Ok(())
    }
}

impl Node for KeyValueList {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.0
                .iter()
                .map(|kv| (kv.key.as_str(), &kv.value as &dyn Node))
                .collect(),
        )
    }

    fn display(&self) -> String {
        self.to_string()
    }

    fn pointer_provider(&self) -> Option<&dyn RelativePointerProvider> {
        Some(self)
    }

    fn label_provider(&self) -> Option<&dyn RelativeLabelProvider> {
        Some(self)
    }

    fn event_valuer(&self) -> Option<&dyn EventValuer> {
        Some(self)
    }
}

impl RelativePointerProvider for KeyValueList {
    fn relative_pointer(&self, target: FieldAddr) -> Option<Pointer> {
        self.entry_for(target).map(|kv| Pointer::new([kv.key.as_str()]))
    }
}

impl RelativeLabelProvider for KeyValueList {
    fn relative_label(&self, target: FieldAddr) -> Option<String> {
        self.entry_for(target).map(|kv| kv.key.clone())
    }
}

impl EventValuer for KeyValueList {
    fn event_values(&self) -> Vec<EventValue> {
        self.0
            .iter()
            .map(|kv| EventValue {
                field: FieldAddr::of(&kv.value),
                value: kv.value.clone(),
                label: kv.key.clone(),
                pointer: Pointer::new([kv.key.as_str()]),
            })
            .collect()
    }
}

impl Truncator for KeyValueList {
    /// Split the budget across entries.
    ///
    /// Entries are taken smallest first while each fits into an even share
    /// of what is left; the remaining budget is then shared evenly and every
    /// value is truncated to its share minus its key.
    fn truncate(&self, matches: &[FieldMatch], limits: &TruncateLimits) -> Self {
        let limit = limits.get_limit();
        if limit == 0 {
            return self.clone();
        }

        let size = |kv: &KeyValue| kv.key.len() + kv.value.len() + ENTRY_OVERHEAD;
        let mut by_size: Vec<&KeyValue> = self.0.iter().collect();
        by_size.sort_by_key(|kv| size(*kv));

        let mut available = limit;
        let mut remaining = by_size.as_slice();
        while let Some((smallest, rest)) = remaining.split_first() {
            let required = size(*smallest);
            if required > available / remaining.len() {
                break;
            }
            available -= required;
            remaining = rest;
        }
        if remaining.is_empty() {
            return self.clone();
        }

        let share = available / remaining.len();
        let marker_only = TRUNCATE_MARKER.len();
        self.0
            .iter()
            .map(|kv| {
                let own = matches_for(FieldAddr::of(&kv.value), matches);
                let budget = share.saturating_sub(kv.key.len() + ENTRY_OVERHEAD).max(marker_only);
                KeyValue {
                    key: kv.key.clone(),
                    value: smart_truncate(&kv.value, &own, budget, limits.get_context()),
                }
            })
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<KeyValue>> for KeyValueList {
    fn from(entries: Vec<KeyValue>) -> Self {
        Self(entries)
    }
}

impl Serialize for KeyValueList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for kv in &self.0 {
            map.serialize_entry(&kv.key, &kv.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyValueList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = KeyValueList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut list = KeyValueList::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    list.push(key, value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}
