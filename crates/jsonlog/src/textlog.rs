//! Flat `LABEL: value` rendering of log objects.
//!
//! Labels come from the text-log tags of record fields. Tag modifiers:
//! - `expand`: splice the field's own fields, prefixed with its label,
//! - `omitempty`: skip the field when its value is empty,
//! - `explicit`: emit the field even without a label (the enclosing
//!   expanded field supplies the prefix).
//!
//! Other modifiers are passed through to the value formatter. Sequences emit
//! their elements' entries with a one-based suffix, maps one entry per key.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::node::{MODIFIER_EXPLICIT, MODIFIER_OMITEMPTY, Node, Shape, unwrap_node};
use crate::reference::concat_labels;

/// One `label: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextlogValuePair {
    pub key: String,
    pub value: String,
}

impl TextlogValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered pairs of one text-log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextlogEntry(Vec<TextlogValuePair>);

impl TextlogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(TextlogValuePair::new(key, value));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|p| p.key == key).map(|p| p.value.as_str())
    }

    pub fn pairs(&self) -> &[TextlogValuePair] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextlogValuePair> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_prefixed(&mut self, prefix: &str, entry: TextlogEntry) {
        for pair in entry {
            self.push(concat_labels(prefix, &pair.key), pair.value);
        }
    }

    fn uppercase_keys(mut self) -> Self {
        for pair in &mut self.0 {
            pair.key = pair.key.to_uppercase();
        }
        self
    }

    /// Make every key unique by suffixing repeats with `_2`, `_3`, ...
    fn dedupe_keys(&mut self) {
        let mut seen = HashSet::with_capacity(self.0.len());
        for pair in &mut self.0 {
            if seen.contains(&pair.key) {
                let renamed = (2..)
                    .map(|n| format!("{}_{n}", pair.key))
                    .find(|candidate| !seen.contains(candidate))
                    .unwrap_or_default();
                trace!(key = pair.key.as_str(), renamed = renamed.as_str(), "duplicate text-log key");
                pair.key = renamed;
            }
            seen.insert(pair.key.clone());
        }
    }
}

impl fmt::Display for TextlogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {}", pair.key, pair.value)?;
        }
        Ok(())
    }
}

impl IntoIterator for TextlogEntry {
    type Item = TextlogValuePair;
    type IntoIter = std::vec::IntoIter<TextlogValuePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TextlogEntry {
    type Item = &'a TextlogValuePair;
    type IntoIter = std::slice::Iter<'a, TextlogValuePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TextlogEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| TextlogValuePair::new(k, v)).collect())
    }
}

/// Formats a single value given its field modifiers.
pub type FormatValueFn = dyn Fn(&dyn Node, &[&str]) -> String + Send + Sync;
/// Decides whether a field is left out, given its modifiers and value.
pub type OmitFn = dyn Fn(&[&str], &dyn Node) -> bool + Send + Sync;

/// Renders log objects into [`TextlogEntry`] values.
#[derive(Clone, Default)]
pub struct TextlogFormatter {
    format_value: Option<Arc<FormatValueFn>>,
    omit: Option<Arc<OmitFn>>,
}

impl fmt::Debug for TextlogFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextlogFormatter")
            .field("format_value", &self.format_value.is_some())
            .field("omit", &self.omit.is_some())
            .finish()
    }
}

impl TextlogFormatter {
    /// Formatter using each value's generic rendering and omitting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value formatter.
    pub fn with_value_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&dyn Node, &[&str]) -> String + Send + Sync + 'static,
    {
        self.format_value = Some(Arc::new(format));
        self
    }

    /// Add an omit rule. Rules accumulate: a field is left out if any
    /// rule rejects it.
    pub fn with_omit<F>(mut self, omit: F) -> Self
    where
        F: Fn(&[&str], &dyn Node) -> bool + Send + Sync + 'static,
    {
        let combined: Arc<OmitFn> = match self.omit.take() {
            Some(previous) => Arc::new(move |modifiers: &[&str], value: &dyn Node| {
                previous(modifiers, value) || omit(modifiers, value)
            }),
            None => Arc::new(omit),
        };
        self.omit = Some(combined);
        self
    }

    /// Render a single value.
    pub fn format_value(&self, value: &dyn Node, modifiers: &[&str]) -> String {
        match &self.format_value {
            Some(format) => format(value, modifiers),
            None => value.display(),
        }
    }

    fn should_omit(&self, modifiers: &[&str], value: &dyn Node) -> bool {
        self.omit.as_ref().is_some_and(|omit| omit(modifiers, value))
    }

    /// Render `node` into an entry with unique keys.
    pub fn format(&self, node: &dyn Node) -> TextlogEntry {
        let mut entry = self.to_entry(node);
        entry.dedupe_keys();
        entry
    }

    fn to_entry(&self, node: &dyn Node) -> TextlogEntry {
        if let Some(custom) = node.custom_formatter() {
            return custom.format_textlog(self).uppercase_keys();
        }
        let mut entry = TextlogEntry::new();
        match node.shape() {
            Shape::Leaf | Shape::Wrapper(None) => {}
            Shape::Wrapper(Some(inner)) => entry = self.to_entry(inner),
            Shape::Record(fields) => {
                for field in fields {
                    let d = field.descriptor;
                    if d.is_textlog_hidden() {
                        continue;
                    }
                    let label = d.label();
                    let modifiers = d.modifiers();
                    let expand = d.embed || d.is_expand();
                    if label.is_empty() && !expand && !modifiers.contains(&MODIFIER_EXPLICIT) {
                        continue;
                    }
                    if modifiers.contains(&MODIFIER_OMITEMPTY) && field.value.is_empty_value() {
                        continue;
                    }
                    if self.should_omit(&modifiers, field.value) {
                        continue;
                    }
                    if expand {
                        entry.extend_prefixed(&label, self.to_entry(field.value));
                    } else {
                        let value = unwrap_node(field.value).unwrap_or(field.value);
                        entry.push(label, self.format_value(value, &modifiers));
                    }
                }
            }
            Shape::Seq(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    let suffix = (index + 1).to_string();
                    for pair in self.to_entry(item) {
                        entry.push(concat_labels(&pair.key, &suffix), pair.value);
                    }
                }
            }
            Shape::Map(entries) => {
                for (key, value) in entries {
                    entry.push(key, self.format_value(value, &[]));
                }
            }
        }
        entry
    }
}
